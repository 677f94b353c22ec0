//! One-pass translation of the raw argument vector into a [`Cmdline`].

use std::str::FromStr;

use tracing::{debug, warn};

use crate::cli::{flags, Cmdline, Counts, RawFormat};
use crate::error::{ParseError, Result};

/// Parse the argument vector of the current process.
pub fn parse_env_args() -> Result<Cmdline> {
    let argv: Vec<String> = std::env::args().collect();
    parse_cmdline(&argv)
}

/// Parse an argument vector into a [`Cmdline`].
///
/// `argv[0]` is the program invocation name, per convention. Tokens
/// starting with `-` must match a registered option; everything else is
/// collected, in order, into [`Cmdline::args`]. Value-bearing options
/// consume the following token unconditionally, so a trailing flag with
/// no token after it is the [`ParseError::MissingValue`] case.
pub fn parse_cmdline(argv: &[String]) -> Result<Cmdline> {
    let program = argv
        .first()
        .cloned()
        .ok_or(ParseError::MissingProgramName)?;
    let full_cmd_line = argv.join(" ");

    let mut cmd = Cmdline {
        program,
        outfile: None,
        format: None,
        ifs: None,
        clip: None,
        numout: None,
        nobary: false,
        de405: false,
        lodm: None,
        dmstep: None,
        numdms: None,
        numsub: None,
        downsamp: None,
        maskfile: None,
        args: Vec::new(),
        full_cmd_line,
        counts: Counts::default(),
    };

    let mut it = argv.iter().skip(1);
    while let Some(token) = it.next() {
        match token.as_str() {
            flags::OUTFILE => {
                cmd.outfile = Some(take_value(&mut it, flags::OUTFILE)?.to_owned());
                cmd.counts.outfile += 1;
            }
            flags::PKMB => {
                cmd.format = Some(RawFormat::Pkmb);
                cmd.counts.pkmb += 1;
            }
            flags::BCPM => {
                cmd.format = Some(RawFormat::Bcpm);
                cmd.counts.bcpm += 1;
            }
            flags::WAPP => {
                cmd.format = Some(RawFormat::Wapp);
                cmd.counts.wapp += 1;
            }
            flags::IF => {
                cmd.ifs = Some(parse_value(&mut it, flags::IF, "integer")?);
                cmd.counts.ifs += 1;
            }
            flags::CLIP => {
                cmd.clip = Some(parse_value(&mut it, flags::CLIP, "float")?);
                cmd.counts.clip += 1;
            }
            flags::NUMOUT => {
                cmd.numout = Some(parse_value(&mut it, flags::NUMOUT, "integer")?);
                cmd.counts.numout += 1;
            }
            flags::NOBARY => {
                cmd.nobary = true;
                cmd.counts.nobary += 1;
            }
            flags::DE405 => {
                cmd.de405 = true;
                cmd.counts.de405 += 1;
            }
            flags::LODM => {
                cmd.lodm = Some(parse_value(&mut it, flags::LODM, "double")?);
                cmd.counts.lodm += 1;
            }
            flags::DMSTEP => {
                cmd.dmstep = Some(parse_value(&mut it, flags::DMSTEP, "double")?);
                cmd.counts.dmstep += 1;
            }
            flags::NUMDMS => {
                cmd.numdms = Some(parse_value(&mut it, flags::NUMDMS, "integer")?);
                cmd.counts.numdms += 1;
            }
            flags::NUMSUB => {
                cmd.numsub = Some(parse_value(&mut it, flags::NUMSUB, "integer")?);
                cmd.counts.numsub += 1;
            }
            flags::DOWNSAMP => {
                cmd.downsamp = Some(parse_value(&mut it, flags::DOWNSAMP, "integer")?);
                cmd.counts.downsamp += 1;
            }
            flags::MASK => {
                cmd.maskfile = Some(take_value(&mut it, flags::MASK)?.to_owned());
                cmd.counts.maskfile += 1;
            }
            other if other.starts_with('-') => {
                return Err(ParseError::UnknownOption(other.to_owned()));
            }
            other => cmd.args.push(other.to_owned()),
        }
    }

    check_format_exclusivity(&cmd)?;

    // Recorded but only meaningful for their format; downstream ignores
    // them otherwise.
    if cmd.ifs.is_some() && cmd.format != Some(RawFormat::Bcpm) {
        warn!("-if is only meaningful with -bcpm");
    }
    if cmd.clip.is_some() && cmd.format != Some(RawFormat::Wapp) {
        warn!("-clip is only meaningful with -wapp");
    }

    debug!(?cmd, "parsed command line");
    Ok(cmd)
}

/// At most one of the raw-data format flags may be supplied.
fn check_format_exclusivity(cmd: &Cmdline) -> Result<()> {
    let seen: Vec<&str> = [
        (cmd.counts.pkmb, flags::PKMB),
        (cmd.counts.bcpm, flags::BCPM),
        (cmd.counts.wapp, flags::WAPP),
    ]
    .iter()
    .filter(|(count, _)| *count > 0)
    .map(|(_, flag)| *flag)
    .collect();

    if seen.len() > 1 {
        return Err(ParseError::ConflictingFormats {
            supplied: seen.join(", "),
        });
    }
    Ok(())
}

fn take_value<'a, I>(it: &mut I, option: &'static str) -> Result<&'a str>
where
    I: Iterator<Item = &'a String>,
{
    it.next()
        .map(String::as_str)
        .ok_or(ParseError::MissingValue { option })
}

fn parse_value<'a, I, T>(it: &mut I, option: &'static str, expected: &'static str) -> Result<T>
where
    I: Iterator<Item = &'a String>,
    T: FromStr,
{
    let raw = take_value(it, option)?;
    raw.parse().map_err(|_| ParseError::TypeMismatch {
        option,
        value: raw.to_owned(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ValueKind, OPTIONS};

    fn argv(line: &str) -> Vec<String> {
        std::iter::once("subprep")
            .chain(line.split_whitespace())
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn sets_each_value_option() {
        let cmd = parse_cmdline(&argv(
            "-o run1 -if 1 -clip 6.0 -numout 5000 -lodm 10.0 -dmstep 0.5 \
             -numdms 64 -numsub 32 -downsamp 4 -mask rfi.mask",
        ))
        .unwrap();
        assert_eq!(cmd.outfile.as_deref(), Some("run1"));
        assert_eq!(cmd.ifs, Some(1));
        assert_eq!(cmd.clip, Some(6.0));
        assert_eq!(cmd.numout, Some(5000));
        assert_eq!(cmd.lodm, Some(10.0));
        assert_eq!(cmd.dmstep, Some(0.5));
        assert_eq!(cmd.numdms, Some(64));
        assert_eq!(cmd.numsub, Some(32));
        assert_eq!(cmd.downsamp, Some(4));
        assert_eq!(cmd.maskfile.as_deref(), Some("rfi.mask"));
    }

    #[test]
    fn sets_each_flag_option() {
        let cmd = parse_cmdline(&argv("-nobary -DE405 -wapp")).unwrap();
        assert!(cmd.nobary);
        assert!(cmd.de405);
        assert_eq!(cmd.format, Some(RawFormat::Wapp));
    }

    #[test]
    fn example_invocation() {
        let cmd = parse_cmdline(&argv("-o run1 -pkmb -numout 5000 data.fits")).unwrap();
        assert_eq!(cmd.outfile.as_deref(), Some("run1"));
        assert_eq!(cmd.format, Some(RawFormat::Pkmb));
        assert_eq!(cmd.numout, Some(5000));
        assert_eq!(cmd.args, ["data.fits"]);
    }

    #[test]
    fn every_registered_option_is_recognized() {
        for spec in OPTIONS {
            let mut v = vec!["subprep".to_owned(), spec.flag.to_owned()];
            match spec.value {
                ValueKind::Flag => {}
                ValueKind::Int => v.push("1".to_owned()),
                ValueKind::Float | ValueKind::Double => v.push("1.0".to_owned()),
                ValueKind::Text => v.push("x".to_owned()),
            }
            let parsed = parse_cmdline(&v);
            assert!(parsed.is_ok(), "{} rejected: {parsed:?}", spec.flag);
        }
    }

    #[test]
    fn every_value_option_requires_a_value() {
        for spec in OPTIONS {
            if spec.value == ValueKind::Flag {
                continue;
            }
            let v = vec!["subprep".to_owned(), spec.flag.to_owned()];
            assert_eq!(
                parse_cmdline(&v).unwrap_err(),
                ParseError::MissingValue { option: spec.flag }
            );
        }
    }

    #[test]
    fn missing_trailing_value() {
        let err = parse_cmdline(&argv("-clip")).unwrap_err();
        assert_eq!(err, ParseError::MissingValue { option: "-clip" });
    }

    #[test]
    fn unknown_option() {
        let err = parse_cmdline(&argv("-bogus")).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption("-bogus".to_owned()));
    }

    #[test]
    fn non_numeric_value() {
        let err = parse_cmdline(&argv("-numdms sixty")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TypeMismatch {
                option: "-numdms",
                ..
            }
        ));
    }

    #[test]
    fn negative_count_rejected() {
        let err = parse_cmdline(&argv("-numout -5")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TypeMismatch {
                option: "-numout",
                ..
            }
        ));
    }

    #[test]
    fn positionals_kept_in_order() {
        let cmd = parse_cmdline(&argv("a.dat -nobary b.dat c.dat")).unwrap();
        assert_eq!(cmd.args, ["a.dat", "b.dat", "c.dat"]);
    }

    #[test]
    fn full_cmd_line_round_trips() {
        let v = argv("-o run1 -pkmb -numout 5000 data.fits");
        let cmd = parse_cmdline(&v).unwrap();
        let retokenized: Vec<&str> = cmd.full_cmd_line.split_whitespace().collect();
        assert_eq!(retokenized, v);
    }

    #[test]
    fn conflicting_formats() {
        let err = parse_cmdline(&argv("-pkmb -wapp")).unwrap_err();
        assert_eq!(
            err,
            ParseError::ConflictingFormats {
                supplied: "-pkmb, -wapp".to_owned()
            }
        );
    }

    #[test]
    fn repeated_format_flag_is_not_a_conflict() {
        let cmd = parse_cmdline(&argv("-pkmb -pkmb")).unwrap();
        assert_eq!(cmd.format, Some(RawFormat::Pkmb));
        assert_eq!(cmd.counts.pkmb, 2);
    }

    #[test]
    fn repeated_value_option_is_last_wins_with_count() {
        let cmd = parse_cmdline(&argv("-o first -o second")).unwrap();
        assert_eq!(cmd.outfile.as_deref(), Some("second"));
        assert_eq!(cmd.counts.outfile, 2);
    }

    #[test]
    fn if_outside_bcpm_still_parses() {
        let cmd = parse_cmdline(&argv("-pkmb -if 2")).unwrap();
        assert_eq!(cmd.ifs, Some(2));
        assert_eq!(cmd.format, Some(RawFormat::Pkmb));
    }

    #[test]
    fn empty_argv_is_rejected() {
        assert_eq!(
            parse_cmdline(&[]).unwrap_err(),
            ParseError::MissingProgramName
        );
    }

    #[test]
    fn no_options_is_a_valid_parse() {
        let cmd = parse_cmdline(&argv("")).unwrap();
        assert_eq!(cmd.program, "subprep");
        assert_eq!(cmd.format, None);
        assert!(cmd.args.is_empty());
        assert_eq!(cmd.full_cmd_line, "subprep");
    }
}
