use std::cmp::Ordering;
use std::env;
use std::process::Command;

// Native backends that can claim a (scalar type, lane count) pair
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    // every flag must be reported by the host for the backend to be usable
    host_flags: &'static [&'static str],
    target_arches: &'static [&'static str],
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number == Highest Priority
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            "neon" => 1,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "avx2",
                host_flags: &["avx2", "fma"],
                target_arches: &["x86_64"],
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                host_flags: &["neon"],
                target_arches: &["aarch64"],
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }

    fn targets(&self, arch: &str) -> bool {
        self.target_arches.contains(&arch)
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected |= feature
                    .host_flags
                    .iter()
                    .all(|flag| contents.contains(flag));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx2" => {
                        feature.detected |= contents.contains("hw.optional.avx2_0: 1")
                            && contents.contains("hw.optional.fma: 1")
                    }
                    "neon" => feature.detected |= contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature], target_arch: &str) {
        features.sort();

        // Highest priority detected backend for this target, or the
        // scalar/composite path when none is available
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected && cpu_feature.targets(target_arch))
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback");

        println!("applying: {cfg_flag}");
        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LANEWISE_FORCE_FALLBACK");
    println!("cargo:rerun-if-env-changed=RUSTFLAGS");
    println!("cargo:rerun-if-env-changed=CARGO_ENCODED_RUSTFLAGS");

    let mut features = CpuFeature::features();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let forced_fallback = env::var("LANEWISE_FORCE_FALLBACK")
        .map(|value| value == "1")
        .unwrap_or(false);

    if !forced_fallback {
        // Features the target is compiled with (-C target-cpu / target-feature)
        // need no detection, and let the kernels inline into their callers
        let static_features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
        let enabled: Vec<&str> = static_features.split(',').collect();
        for feature in features.iter_mut() {
            feature.detected = feature.host_flags.iter().all(|flag| enabled.contains(flag));
        }

        // Advanced SIMD is part of the aarch64 baseline
        if target_arch == "aarch64" {
            for feature in features.iter_mut().filter(|f| f.name == "neon") {
                feature.detected = true;
            }
        } else if host == target {
            // CPU flags are only meaningful when the build host runs the code
            PlatformDetector::detect_cpu_features(&mut features);
        }
    }

    PlatformDetector::apply(&mut features, &target_arch);
}
