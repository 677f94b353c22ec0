//! Usage text rendered from the option registry.

use std::fmt::Write;

use crate::cli::OPTIONS;

/// Render the invocation synopsis plus one line per recognized option.
///
/// Pure; the binary writes it to stderr when a parse fails.
pub fn usage(program: &str) -> String {
    let mut text = String::new();
    let _ = write!(text, "usage: {program}");
    for spec in OPTIONS {
        match spec.value.metavar() {
            Some(meta) => {
                let _ = write!(text, " [{} {meta}]", spec.flag);
            }
            None => {
                let _ = write!(text, " [{}]", spec.flag);
            }
        }
    }
    let _ = writeln!(text, " [files...]");
    let _ = writeln!(text);

    for spec in OPTIONS {
        let meta = spec.value.metavar().unwrap_or("");
        let _ = writeln!(text, "  {:<10}{meta:<7}{}", spec.flag, spec.help);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_names_the_program() {
        assert!(usage("subprep").starts_with("usage: subprep"));
    }

    #[test]
    fn usage_lists_every_option_with_help() {
        let text = usage("subprep");
        for spec in OPTIONS {
            assert!(text.contains(spec.flag), "usage is missing {}", spec.flag);
            assert!(text.contains(spec.help), "usage is missing help for {}", spec.flag);
        }
    }

    #[test]
    fn flags_carry_no_value_placeholder() {
        let text = usage("subprep");
        assert!(text.contains("[-pkmb]"));
        assert!(text.contains("[-lodm dbl]"));
        assert!(text.contains("[-numout int]"));
    }
}
