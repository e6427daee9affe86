use std::{env, fs, fs::File, io::BufReader, path::PathBuf, process::Command};
use stochmean::StochasticMean;

fn run_bin(args: &[&str]) -> bool {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_stochmean"));

    let output = Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command");

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");
    println!("args: {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n");

    output.status.success()
}

#[test]
fn random_walk_msd() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("random_walk_msd");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir_all(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[walk]\n"
        + "n_steps = 1000\n"
        + "step_vals = [ -1.0, 0.0, 1.0,]\n"
        + "prob_steps = [ 0.25, 0.5, 0.25,]\n"
        + "seed = 42\n"
        + "\n"
        + "[analysis]\n"
        + "bins = [ 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,]\n"
        + "kernel = \"square\"\n";

    fs::write(&config_path, config_contents).expect("failed to write config file");

    let output_path = test_dir.join("msd.msgpack");
    let config_str = config_path
        .to_str()
        .expect("failed to convert config path to string");
    let output_str = output_path
        .to_str()
        .expect("failed to convert output path to string");

    assert!(run_bin(&["--config", config_str, "--output", output_str]));

    let file = File::open(&output_path).expect("failed to open output file");
    let res: StochasticMean =
        rmp_serde::decode::from_read(BufReader::new(file)).expect("failed to decode output");

    assert_eq!(res.bins, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    assert_eq!(res.means[0], 0.0);
    assert_eq!(res.n_vals[1], 999);

    // Step variance is 0.5, so the MSD grows roughly as t / 2.
    for i_bin in 1..res.len() {
        let t = res.bins[i_bin];
        assert!(res.means[i_bin] > 0.2 * t && res.means[i_bin] < 1.0 * t);
    }

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn invalid_config_fails() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("invalid_config_fails");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir_all(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[walk]\n"
        + "n_steps = 100\n"
        + "step_vals = [ -1.0, 1.0,]\n"
        + "prob_steps = [ 0.7, 0.7,]\n"
        + "\n"
        + "[analysis]\n"
        + "bins = [ 0.0, 1.0,]\n";

    fs::write(&config_path, config_contents).expect("failed to write config file");

    let config_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    assert!(!run_bin(&["--config", config_str]));

    fs::remove_dir_all(&test_dir).ok();
}
