//! Interactive line-oriented menu
//!
//! 1. Encrypt with a user-supplied key
//! 2. Brute-force a ciphertext
//! 3. Exit
//!
//! Errors in one round are reported and the loop continues. End of input
//! behaves like choosing Exit.

use crate::report::write_outcome;
use hill_break_core::{encrypt, HillKey, KeySearch, ParallelBackend, SearchConfig};
use std::io::{self, BufRead, Write};

const MENU_TOP_N: usize = 20;

/// Print `message` and read one trimmed line; `None` on end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn run_menu<R: BufRead, W: Write>(mut input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "2x2 Hill Cipher (Brute-force mode available)")?;

    loop {
        writeln!(out, "\nMenu:")?;
        writeln!(out, "1. Encrypt (provide key)")?;
        writeln!(out, "2. Brute-force decrypt ciphertext (try all invertible 2x2 keys)")?;
        writeln!(out, "3. Exit")?;

        let choice = match prompt(&mut input, &mut out, "Choice: ")? {
            Some(choice) => choice,
            None => break,
        };

        match choice.as_str() {
            "1" => {
                if !encrypt_round(&mut input, &mut out)? {
                    break;
                }
            }
            "2" => {
                if !search_round(&mut input, &mut out)? {
                    break;
                }
            }
            "3" => break,
            _ => writeln!(out, "Invalid choice. Try again.")?,
        }
    }

    writeln!(out, "Goodbye.")?;
    Ok(())
}

/// Returns `false` when input ran out
fn encrypt_round<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    let Some(key_line) = prompt(input, out, "Enter 4 integers for key (row-major), e.g. '3 3 2 5': ")? else {
        return Ok(false);
    };
    let key: HillKey = match key_line.parse() {
        Ok(key) => key,
        Err(err) => {
            writeln!(out, "Error: {}", err)?;
            return Ok(true);
        }
    };
    if !key.is_invertible() {
        writeln!(
            out,
            "Warning: provided key is NOT invertible modulo 26 and cannot be used for decryption."
        )?;
    }

    let Some(plain) = prompt(input, out, "Enter plaintext (letters only): ")? else {
        return Ok(false);
    };
    writeln!(out, "Ciphertext: {}", encrypt(&key, &plain))?;
    Ok(true)
}

/// Returns `false` when input ran out
fn search_round<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    let Some(ciphertext) = prompt(input, out, "Enter ciphertext (letters only): ")? else {
        return Ok(false);
    };
    if ciphertext.is_empty() || !ciphertext.chars().all(|ch| ch.is_ascii_alphabetic()) {
        writeln!(out, "Ciphertext must be alphabetic only.")?;
        return Ok(true);
    }

    let Some(known) = prompt(input, out, "Optional known plaintext substring (press Enter to skip): ")? else {
        return Ok(false);
    };
    let known = Some(known.as_str()).filter(|s| !s.is_empty());

    let backend = match ParallelBackend::new(0) {
        Ok(backend) => backend,
        Err(err) => {
            writeln!(out, "Error: {}", err)?;
            return Ok(true);
        }
    };
    let config = SearchConfig::default()
        .with_top_n(MENU_TOP_N)
        .with_known_plaintext(known);

    writeln!(out, "Brute-forcing... (this may take a little while)")?;
    let (outcome, _stats) = KeySearch::with_config(backend, config).run(&ciphertext);
    write_outcome(out, &outcome)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> String {
        let mut out = Vec::new();
        run_menu(Cursor::new(script.as_bytes()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_menu_encrypt() {
        let text = run("1\n3 3 2 5\nhello world\n3\n");
        assert!(text.contains("Ciphertext: HIOZEIPJQL"));
        assert!(text.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_menu_encrypt_singular_key_warns() {
        let text = run("1\n2 4 1 2\nhello\n3\n");
        assert!(text.contains("Warning: provided key is NOT invertible"));
        assert!(text.contains("Ciphertext: EPOHQI"));
    }

    #[test]
    fn test_menu_bad_key_continues() {
        let text = run("1\n1 2 3\n3\n");
        assert!(text.contains("Error: Invalid key format"));
        assert!(text.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_menu_rejects_non_alphabetic_ciphertext() {
        let text = run("2\nABC123\n3\n");
        assert!(text.contains("Ciphertext must be alphabetic only."));
    }

    #[test]
    fn test_menu_known_plaintext_search() {
        let text = run("2\nHIOZEIPJQL\nhelloworld\n3\n");
        assert!(text.contains("Match found: key [[ 3,  3], [ 2,  5]] -> plaintext: HELLOWORLD (score 5)"));
    }

    #[test]
    fn test_menu_invalid_choice_and_eof() {
        let text = run("9\n");
        assert!(text.contains("Invalid choice. Try again."));
        assert!(text.ends_with("Goodbye.\n"));
    }
}
