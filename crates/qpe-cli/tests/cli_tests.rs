//! CLI command parsing and request loading tests.
//!
//! The CLI is a binary crate, so argument parsing is checked on a mirror of
//! its clap structs and request loading through the library types it wraps.

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Args, Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qpe")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[arg(short, long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Args, Debug)]
    struct TestRequest {
        #[arg(short, long, allow_negative_numbers = true)]
        angle: Option<f64>,
        #[arg(short, long, default_value = "rotation")]
        unitary: String,
        #[arg(short, long, default_value = "4", allow_negative_numbers = true)]
        precision: i64,
        #[arg(short, long, allow_negative_numbers = true)]
        shots: Option<i64>,
        #[arg(long, conflicts_with = "angle")]
        params: Option<PathBuf>,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Estimate {
            #[command(flatten)]
            request: TestRequest,
            #[arg(short, long, default_value = "simulator")]
            backend: String,
            #[arg(long)]
            seed: Option<u64>,
            #[arg(short, long, default_value = "table")]
            format: String,
        },
        Circuit {
            #[command(flatten)]
            request: TestRequest,
            #[arg(short, long)]
            output: Option<PathBuf>,
        },
        Unitaries,
        Version,
    }

    #[test]
    fn test_parse_estimate_minimal() {
        let cli = TestCli::try_parse_from(["qpe", "estimate", "--angle", "0.25"]).unwrap();
        match cli.command {
            TestCommands::Estimate {
                request,
                backend,
                seed,
                format,
            } => {
                assert_eq!(request.angle, Some(0.25));
                assert_eq!(request.unitary, "rotation");
                assert_eq!(request.precision, 4);
                assert_eq!(request.shots, None);
                assert_eq!(backend, "simulator");
                assert_eq!(seed, None);
                assert_eq!(format, "table");
            }
            _ => panic!("expected Estimate"),
        }
    }

    #[test]
    fn test_parse_estimate_full() {
        let cli = TestCli::try_parse_from([
            "qpe", "-vv", "estimate", "-a", "0.3", "-u", "z", "-p", "6", "-s", "2000", "--seed",
            "7", "-f", "json", "-b", "sim",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            TestCommands::Estimate {
                request,
                backend,
                seed,
                format,
            } => {
                assert_eq!(request.angle, Some(0.3));
                assert_eq!(request.unitary, "z");
                assert_eq!(request.precision, 6);
                assert_eq!(request.shots, Some(2000));
                assert_eq!(backend, "sim");
                assert_eq!(seed, Some(7));
                assert_eq!(format, "json");
            }
            _ => panic!("expected Estimate"),
        }
    }

    #[test]
    fn test_negative_values_reach_validation() {
        // Out-of-range numbers must parse so the engine can name the field.
        let cli = TestCli::try_parse_from([
            "qpe", "estimate", "--angle", "-0.1", "--precision", "-1", "--shots", "0",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Estimate { request, .. } => {
                assert_eq!(request.angle, Some(-0.1));
                assert_eq!(request.precision, -1);
                assert_eq!(request.shots, Some(0));
            }
            _ => panic!("expected Estimate"),
        }
    }

    #[test]
    fn test_params_conflicts_with_angle() {
        let result = TestCli::try_parse_from([
            "qpe", "estimate", "--angle", "0.5", "--params", "req.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_circuit_with_global_config() {
        let cli = TestCli::try_parse_from([
            "qpe", "circuit", "-a", "0.5", "-o", "out.json", "--config", "qpe.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("qpe.yaml")));
        match cli.command {
            TestCommands::Circuit { request, output } => {
                assert_eq!(request.angle, Some(0.5));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected Circuit"),
        }
    }

    #[test]
    fn test_parse_simple_commands() {
        assert!(matches!(
            TestCli::try_parse_from(["qpe", "unitaries"]).unwrap().command,
            TestCommands::Unitaries
        ));
        assert!(matches!(
            TestCli::try_parse_from(["qpe", "version"]).unwrap().command,
            TestCommands::Version
        ));
        assert!(TestCli::try_parse_from(["qpe", "bogus"]).is_err());
    }
}

// ============================================================================
// Request and config loading
// ============================================================================

mod request_loading {
    use std::io::Write;

    use qpe_core::{EngineConfig, RawParameters};

    #[test]
    fn test_yaml_request_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "angle: 0.375\nunitary: y\nprecision: 3\nmeasurements: 50").unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let raw: RawParameters = serde_yaml_ng::from_str(&contents).unwrap();
        assert_eq!(raw, RawParameters::new(0.375, "y", 3).with_measurements(50));
    }

    #[test]
    fn test_json_request_file() {
        let raw: RawParameters =
            serde_json::from_str(r#"{"angle": 0.5, "unitary_kind": "phase"}"#).unwrap();
        assert_eq!(raw.unitary_kind, "phase");
        assert_eq!(raw.precision, 4);
    }

    #[test]
    fn test_engine_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_measurements: 256\ninclude_histogram: false").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_measurements, 256);
        assert!(!config.include_histogram);
    }
}
