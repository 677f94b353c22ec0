//! The option registry and the parsed command line.
//!
//! [`OPTIONS`] is the single source of truth for the flags this tool
//! understands; the parser, the usage reporter, and the value echo all
//! read from it. [`Cmdline`] is the parsed result: built once by
//! [`parse_cmdline`](crate::parse::parse_cmdline), never mutated after.

use std::fmt;

/// Flag tokens exactly as they appear on the command line.
pub mod flags {
    pub const OUTFILE: &str = "-o";
    pub const PKMB: &str = "-pkmb";
    pub const BCPM: &str = "-bcpm";
    pub const IF: &str = "-if";
    pub const WAPP: &str = "-wapp";
    pub const CLIP: &str = "-clip";
    pub const NUMOUT: &str = "-numout";
    pub const NOBARY: &str = "-nobary";
    pub const DE405: &str = "-DE405";
    pub const LODM: &str = "-lodm";
    pub const DMSTEP: &str = "-dmstep";
    pub const NUMDMS: &str = "-numdms";
    pub const NUMSUB: &str = "-numsub";
    pub const DOWNSAMP: &str = "-downsamp";
    pub const MASK: &str = "-mask";
}

/// What an option consumes after its flag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Flag,
    Int,
    Float,
    Double,
    Text,
}

impl ValueKind {
    /// Placeholder shown in the usage synopsis, `None` for bare flags.
    pub fn metavar(self) -> Option<&'static str> {
        match self {
            ValueKind::Flag => None,
            ValueKind::Int => Some("int"),
            ValueKind::Float => Some("float"),
            ValueKind::Double => Some("dbl"),
            ValueKind::Text => Some("str"),
        }
    }
}

/// One entry in the option registry.
#[derive(Debug, Clone, Copy)]
pub struct OptSpec {
    pub flag: &'static str,
    pub value: ValueKind,
    pub help: &'static str,
}

/// Every option the parser recognizes, in the order usage prints them.
pub const OPTIONS: &[OptSpec] = &[
    OptSpec {
        flag: flags::OUTFILE,
        value: ValueKind::Text,
        help: "Root of the output file names",
    },
    OptSpec {
        flag: flags::PKMB,
        value: ValueKind::Flag,
        help: "Raw data in Parkes Multibeam format",
    },
    OptSpec {
        flag: flags::BCPM,
        value: ValueKind::Flag,
        help: "Raw data in Berkeley-Caltech Pulsar Machine (BPP) format",
    },
    OptSpec {
        flag: flags::IF,
        value: ValueKind::Int,
        help: "For BPP format only: a specific IF to use",
    },
    OptSpec {
        flag: flags::WAPP,
        value: ValueKind::Flag,
        help: "Raw data in Wideband Arecibo Pulsar Processor (WAPP) format",
    },
    OptSpec {
        flag: flags::CLIP,
        value: ValueKind::Float,
        help: "For WAPP format only: time-domain sigma to use for clipping (0 = no clipping)",
    },
    OptSpec {
        flag: flags::NUMOUT,
        value: ValueKind::Int,
        help: "Output this many values, padding with the average if the input runs short",
    },
    OptSpec {
        flag: flags::NOBARY,
        value: ValueKind::Flag,
        help: "Do not barycenter the data",
    },
    OptSpec {
        flag: flags::DE405,
        value: ValueKind::Flag,
        help: "Use the DE405 ephemeris for barycentering instead of DE200",
    },
    OptSpec {
        flag: flags::LODM,
        value: ValueKind::Double,
        help: "The lowest dispersion measure to de-disperse (cm^-3 pc)",
    },
    OptSpec {
        flag: flags::DMSTEP,
        value: ValueKind::Double,
        help: "The stepsize in dispersion measure to use (cm^-3 pc)",
    },
    OptSpec {
        flag: flags::NUMDMS,
        value: ValueKind::Int,
        help: "The number of DMs to de-disperse",
    },
    OptSpec {
        flag: flags::NUMSUB,
        value: ValueKind::Int,
        help: "The number of sub-bands to use",
    },
    OptSpec {
        flag: flags::DOWNSAMP,
        value: ValueKind::Int,
        help: "The number of neighboring bins to co-add",
    },
    OptSpec {
        flag: flags::MASK,
        value: ValueKind::Text,
        help: "File containing masking information to use",
    },
];

/// Look up a registry entry by its flag token.
pub fn lookup(flag: &str) -> Option<&'static OptSpec> {
    OPTIONS.iter().find(|opt| opt.flag == flag)
}

/// Which raw-data decoder the downstream pipeline should use.
///
/// The three formats are mutually exclusive on the command line; the
/// parser rejects an invocation that selects more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    /// Parkes Multibeam
    Pkmb,
    /// Berkeley-Caltech Pulsar Machine (BPP)
    Bcpm,
    /// Wideband Arecibo Pulsar Processor
    Wapp,
}

impl RawFormat {
    /// The flag token that selects this format.
    pub fn flag(self) -> &'static str {
        match self {
            RawFormat::Pkmb => flags::PKMB,
            RawFormat::Bcpm => flags::BCPM,
            RawFormat::Wapp => flags::WAPP,
        }
    }
}

/// How many times each option appeared.
///
/// Repeated value options are last-wins; callers that require an option
/// at most once can check the count here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub outfile: u32,
    pub pkmb: u32,
    pub bcpm: u32,
    pub wapp: u32,
    pub ifs: u32,
    pub clip: u32,
    pub numout: u32,
    pub nobary: u32,
    pub de405: u32,
    pub lodm: u32,
    pub dmstep: u32,
    pub numdms: u32,
    pub numsub: u32,
    pub downsamp: u32,
    pub maskfile: u32,
}

/// Options parsed from one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Cmdline {
    /// Invocation name (argv[0])
    pub program: String,
    /// Root of the output file names
    pub outfile: Option<String>,
    /// Selected raw-data format, if any
    pub format: Option<RawFormat>,
    /// Specific IF to use (BPP only)
    pub ifs: Option<u32>,
    /// Time-domain clipping sigma (WAPP only), 0 disables clipping
    pub clip: Option<f32>,
    /// Number of values to output; downstream pads with the average
    /// value if the input runs short
    pub numout: Option<u64>,
    /// Skip barycentric time correction
    pub nobary: bool,
    /// Use the DE405 ephemeris instead of DE200
    pub de405: bool,
    /// Lowest dispersion measure to de-disperse (cm^-3 pc)
    pub lodm: Option<f64>,
    /// Stepsize in dispersion measure (cm^-3 pc)
    pub dmstep: Option<f64>,
    /// Number of DMs to de-disperse
    pub numdms: Option<u32>,
    /// Number of sub-bands to use
    pub numsub: Option<u32>,
    /// Number of neighboring bins to co-add
    pub downsamp: Option<u32>,
    /// File containing masking information
    pub maskfile: Option<String>,
    /// Leftover positional arguments, in order
    pub args: Vec<String>,
    /// The whole argument vector joined with single spaces
    pub full_cmd_line: String,
    /// Occurrence count per option
    pub counts: Counts,
}

fn show<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "not set".to_owned(),
    }
}

fn on_off(set: bool) -> &'static str {
    if set {
        "set"
    } else {
        "not set"
    }
}

impl Cmdline {
    /// Render the effective value of every option, for diagnostic
    /// confirmation. Read-only.
    pub fn show_option_values(&self) -> String {
        fn line(out: &mut String, label: &str, value: &str) {
            out.push_str(&format!("  {label:<10}{value}\n"));
        }

        let mut out = format!("Effective option values for {}:\n", self.program);
        line(&mut out, flags::OUTFILE, &show(&self.outfile));
        line(
            &mut out,
            "format",
            self.format.map(RawFormat::flag).unwrap_or("not set"),
        );
        line(&mut out, flags::IF, &show(&self.ifs));
        line(&mut out, flags::CLIP, &show(&self.clip));
        line(&mut out, flags::NUMOUT, &show(&self.numout));
        line(&mut out, flags::NOBARY, on_off(self.nobary));
        line(&mut out, flags::DE405, on_off(self.de405));
        line(&mut out, flags::LODM, &show(&self.lodm));
        line(&mut out, flags::DMSTEP, &show(&self.dmstep));
        line(&mut out, flags::NUMDMS, &show(&self.numdms));
        line(&mut out, flags::NUMSUB, &show(&self.numsub));
        line(&mut out, flags::DOWNSAMP, &show(&self.downsamp));
        line(&mut out, flags::MASK, &show(&self.maskfile));
        let args = if self.args.is_empty() {
            "none".to_owned()
        } else {
            self.args.join(" ")
        };
        line(&mut out, "args", &args);
        line(&mut out, "cmdline", &self.full_cmd_line);
        out
    }
}
