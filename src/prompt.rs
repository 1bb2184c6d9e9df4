use std::io::{self, BufRead, Write};

/// Bounded re-prompt budget for the slug before giving up.
const SLUG_ATTEMPTS: usize = 3;

/// Ask whether alternates should be dropped from the promotion lists.
/// Anything that is not an explicit "n"/"no" counts as yes.
pub fn read_remove_alternates(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    writeln!(
        output,
        "Automatically remove alternates? (y/n) [defaults to yes on invalid input]"
    )?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(parse_yes_no(&line))
}

fn parse_yes_no(input: &str) -> bool {
    !matches!(input.trim().to_ascii_lowercase().as_str(), "n" | "no")
}

/// Ask for the tournament slug. Blank input is re-prompted a bounded number
/// of times, then reported as an error.
pub fn read_slug(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<String> {
    for attempt in 0..SLUG_ATTEMPTS {
        if attempt == 0 {
            writeln!(
                output,
                "Enter the tournament slug as shown in the start.gg URL, e.g. \"rlcs-2022-23-fall-open-north-america\":"
            )?;
        } else {
            writeln!(output, "Invalid slug. Please try again.")?;
        }
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break; // stdin closed
        }
        let slug = line.trim();
        if !slug.is_empty() {
            return Ok(slug.to_owned());
        }
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "no tournament slug provided",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn yes_and_default_inputs_remove_alternates() {
        assert!(parse_yes_no("y\n"));
        assert!(parse_yes_no("Y\n"));
        assert!(parse_yes_no(""));
        assert!(parse_yes_no("whatever\n"));
    }

    #[test]
    fn explicit_no_keeps_alternates() {
        assert!(!parse_yes_no("n\n"));
        assert!(!parse_yes_no("No\n"));
    }

    #[test]
    fn remove_alternates_prompt_reads_one_line() {
        let mut input = Cursor::new("n\nleftover\n");
        let mut output = Vec::new();
        let remove = read_remove_alternates(&mut input, &mut output).unwrap();
        assert!(!remove);
        assert!(String::from_utf8(output).unwrap().contains("(y/n)"));
    }

    #[test]
    fn slug_is_trimmed() {
        let mut input = Cursor::new("  some-tournament-slug  \n");
        let mut output = Vec::new();
        let slug = read_slug(&mut input, &mut output).unwrap();
        assert_eq!(slug, "some-tournament-slug");
    }

    #[test]
    fn blank_slug_is_reprompted() {
        let mut input = Cursor::new("\n\nthird-try\n");
        let mut output = Vec::new();
        let slug = read_slug(&mut input, &mut output).unwrap();
        assert_eq!(slug, "third-try");
        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("try again").count(), 2);
    }

    #[test]
    fn slug_prompt_gives_up_after_bounded_attempts() {
        let mut input = Cursor::new("\n\n\n\n\n");
        let mut output = Vec::new();
        let err = read_slug(&mut input, &mut output).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn closed_stdin_errors_instead_of_looping() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(read_slug(&mut input, &mut output).is_err());
    }
}
