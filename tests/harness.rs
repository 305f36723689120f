use std::path::Path;

use anyhow::{Context, Result, ensure};

use shiba::interpreter::Interpreter;
use test_support::{CaseClass, load_cases, normalize_output};

#[test]
fn runs_fixture_programs() -> Result<()> {
    let cases = load_cases(Path::new("tests/programs"))?;

    for case in cases {
        let mut interpreter = Interpreter::new();
        let result = interpreter.run_file(&case.program_path);
        let output = interpreter.take_output().join("\n");

        match case.spec.class {
            CaseClass::RuntimeSuccess => {
                ensure!(
                    case.spec.expected.exit_code == 0,
                    "Case {} expected exit code must be 0 for runtime_success",
                    case.name
                );
                result.with_context(|| format!("Case {} failed", case.name))?;
                let stdout_file = case
                    .spec
                    .expected
                    .stdout_file
                    .as_deref()
                    .with_context(|| format!("Missing stdout_file in {}", case.name))?;
                let expected = case.read_text(stdout_file)?;
                assert_eq!(
                    normalize_output(&output),
                    normalize_output(&expected),
                    "Output mismatch for {}",
                    case.name
                );
            }
            CaseClass::FrontendError | CaseClass::RuntimeError => {
                ensure!(
                    case.spec.expected.exit_code == 1,
                    "Case {} expected exit code must be 1 for an error case",
                    case.name
                );
                let expected_error = case.expected_error()?;
                let error = match result {
                    Ok(()) => anyhow::bail!("Expected error in {}, but it succeeded", case.name),
                    Err(error) => format!("{error:#}"),
                };
                ensure!(
                    error.contains(&expected_error),
                    "Expected error containing '{expected_error}' in {}, got '{error}'",
                    case.name
                );
                if case.spec.class == CaseClass::FrontendError {
                    ensure!(
                        output.is_empty(),
                        "Case {} produced output before its frontend error",
                        case.name
                    );
                }
            }
        }
    }

    Ok(())
}
