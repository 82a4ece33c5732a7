use marker::{get_opts, run_marker, MarkerResult};
use std::io::Write;
use termcolor::{BufferedStandardStream, Color, ColorChoice, ColorSpec, WriteColor};

fn main_impl() -> Result<i32, Box<dyn std::error::Error>> {
    let opts = get_opts();
    let quiet = opts.quiet;

    let MarkerResult {
        code,
        stdout,
        verdict,
    } = run_marker(opts);

    if quiet {
        return Ok(code);
    }

    let use_color = atty::is(atty::Stream::Stdout);
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut ch_stdout = BufferedStandardStream::stdout(choice);

    if !stdout.is_empty() {
        write!(&mut ch_stdout, "{}", stdout)?;
        if verdict.is_none() && !stdout.ends_with('\n') {
            writeln!(&mut ch_stdout)?;
        }
    }

    if let Some(equivalent) = verdict {
        let (color, text) = if equivalent {
            (Color::Green, "equivalent")
        } else {
            (Color::Red, "not equivalent")
        };
        ch_stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        writeln!(&mut ch_stdout, "{}", text)?;
        ch_stdout.reset()?;
    }
    ch_stdout.flush()?;

    Ok(code)
}

fn main() {
    match main_impl() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    }
}
