use std::env;
use std::fs;
use std::path::PathBuf;

/// Build-time application parameter with its fallback value
struct Param {
    name: &'static str,
    default: &'static str,
}

const PARAMS: &[Param] = &[
    // Reporting cycle period in milliseconds
    Param {
        name: "IMU_REPORT_INTERVAL_MS",
        default: "1000",
    },
    // Accelerometer and gyroscope output data rate in Hz
    Param {
        name: "IMU_ODR_HZ",
        default: "104",
    },
    // How long the green "ready" color is held before sampling starts
    Param {
        name: "IMU_READY_HOLD_MS",
        default: "500",
    },
    // "push" (data-ready trigger) or "pull" (fetch once per reporting cycle)
    Param {
        name: "IMU_SAMPLING_MODE",
        default: "push",
    },
];

fn main() {
    for param in PARAMS {
        if let Ok(value) = env::var(param.name) {
            println!("cargo:rustc-env={}={}", param.name, value);
            println!(
                "cargo:warning=Using {} from environment: {}",
                param.name, value
            );
        } else {
            println!("cargo:rustc-env={}={}", param.name, param.default);
        }
        println!("cargo:rerun-if-env-changed={}", param.name);
    }

    // Memory layout for the RP2350 target
    if env::var("CARGO_FEATURE_PICO2_W").is_ok() {
        let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
        fs::write(out.join("memory.x"), include_bytes!("memory.x")).expect("write memory.x");
        println!("cargo:rustc-link-search={}", out.display());
        println!("cargo:rerun-if-changed=memory.x");
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
