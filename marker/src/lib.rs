//! The marker app: a command-line front end for the
//! [libmarker](libmarker) grading engine.
//!
//! One invocation grades one candidate/reference pair and exits 0 when the
//! answers are equivalent, 1 when they are not. `--extract` treats the
//! candidate as raw model output and pulls the final answer out of it
//! first; `--normalize` dumps a normalization stage instead of grading,
//! which is handy when debugging why two answers did or did not match.

use libmarker::{extract_answer, grade_answer, normalize_mathd, normalize_symbolic};

/// Options to run marker with.
pub struct Opts {
    /// The candidate answer, or raw model output under `--extract`.
    pub answer: String,
    /// The reference answer. Absent only in `--normalize` mode.
    pub reference: Option<String>,
    /// When true, extract a final answer from `answer` before grading.
    pub extract: bool,
    /// When present, dump this normalization stage of the answer and exit.
    pub normalize: Option<String>,
    /// When true, print nothing; the exit code carries the verdict.
    pub quiet: bool,
}

/// Parses [Opts](self::Opts) from the command line.
pub fn get_opts() -> Opts {
    let matches = clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            clap::Arg::with_name("answer")
                .help("Candidate answer (or raw model output with --extract)")
                .required(true),
        )
        .arg(
            clap::Arg::with_name("reference")
                .help("Reference answer to grade against")
                .required_unless("normalize"),
        )
        .arg(
            clap::Arg::with_name("extract")
                .short("-e")
                .long("--extract")
                .help("Extract the final answer (last \\boxed{...}, answer label, or last line) before grading."),
        )
        .arg(
            clap::Arg::with_name("normalize")
                .long("--normalize")
                .value_name("stage")
                .next_line_help(true)
                .help(
                    "Print a normalization stage of the answer and exit. Possible values:\n\
                    \tmathd:    light LaTeX cleanup, the string-equality fast path.\n\
                    \tsymbolic: full flattening used for symbolic comparison.\n\
                    ",
                )
                .hide_possible_values(true)
                .takes_value(true)
                .possible_values(&["mathd", "symbolic"]),
        )
        .arg(
            clap::Arg::with_name("quiet")
                .short("-q")
                .long("--quiet")
                .help("Print nothing; the exit code carries the verdict."),
        )
        .get_matches();

    Opts {
        answer: matches.value_of("answer").unwrap_or_default().into(),
        reference: matches.value_of("reference").map(str::to_owned),
        extract: matches.is_present("extract"),
        normalize: matches.value_of("normalize").map(str::to_owned),
        quiet: matches.is_present("quiet"),
    }
}

/// Output of a marker execution.
#[derive(Default)]
pub struct MarkerResult {
    /// Exit code.
    pub code: i32,
    /// Emit for stdout, excluding the verdict line.
    pub stdout: String,
    /// The grading verdict, when one was computed.
    pub verdict: Option<bool>,
}

/// Runs marker end-to-end.
pub fn run_marker(opts: Opts) -> MarkerResult {
    let candidate = if opts.extract {
        extract_answer(&opts.answer)
    } else {
        opts.answer.clone()
    };

    if let Some(stage) = &opts.normalize {
        let normalized = match stage.as_str() {
            "symbolic" => normalize_symbolic(&candidate),
            _ => normalize_mathd(&candidate),
        };
        return MarkerResult {
            code: 0,
            stdout: normalized,
            verdict: None,
        };
    }

    let reference = opts.reference.unwrap_or_default();
    let equivalent = grade_answer(Some(candidate.as_str()), &reference);

    let mut stdout = String::new();
    if opts.extract {
        stdout.push_str(&format!("extracted: {}\n", candidate));
    }
    MarkerResult {
        code: if equivalent { 0 } else { 1 },
        stdout,
        verdict: Some(equivalent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(answer: &str, reference: &str) -> Opts {
        Opts {
            answer: answer.into(),
            reference: Some(reference.into()),
            extract: false,
            normalize: None,
            quiet: false,
        }
    }

    #[test]
    fn grades_equivalent_pair() {
        let result = run_marker(opts("0.5", "1/2"));
        assert_eq!(result.code, 0);
        assert_eq!(result.verdict, Some(true));
    }

    #[test]
    fn grades_non_equivalent_pair() {
        let result = run_marker(opts("2/4", "1/2"));
        assert_eq!(result.code, 1);
        assert_eq!(result.verdict, Some(false));
    }

    #[test]
    fn extracts_before_grading() {
        let mut opts = opts("We conclude \\boxed{3}, no wait, \\boxed{5}.", "5");
        opts.extract = true;
        let result = run_marker(opts);
        assert_eq!(result.code, 0);
        assert_eq!(result.stdout, "extracted: 5\n");
    }

    #[test]
    fn dumps_normalization_stage() {
        let mut opts = opts("\\tfrac{1}{2}", "");
        opts.reference = None;
        opts.normalize = Some("mathd".into());
        let result = run_marker(opts);
        assert_eq!(result.code, 0);
        assert_eq!(result.stdout, "\\frac{1}{2}");
        assert_eq!(result.verdict, None);
    }
}
