use crate::error::{Error, Result};
use std::io::{BufRead, Write};

/// Parses a selection against `available`.
///
/// `0` selects everything; otherwise a comma separated list of 1-based
/// indices. Out of range indices are dropped with a warning; if nothing
/// valid remains the selection is rejected.
pub fn parse_selection(input: &str, available: &[String]) -> Result<Vec<String>> {
    let choice = input.trim();
    if choice.is_empty() {
        return Err(Error::Selection("Please enter a valid selection.".to_string()));
    }
    if choice == "0" {
        return Ok(available.to_vec());
    }

    let indices = choice.split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::Selection("Invalid input. Please enter numbers separated by commas.".to_string()))?;

    let mut selected: Vec<String> = Vec::new();
    for idx in indices {
        match available.get(idx.wrapping_sub(1)) {
            Some(name) => {
                if !selected.contains(name) {
                    selected.push(name.clone());
                }
            }
            _ => log::warn!("Invalid interface number: {}", idx),
        }
    }

    if selected.is_empty() {
        return Err(Error::Selection("No valid interfaces selected. Please try again.".to_string()));
    }
    Ok(selected)
}

/// Resolves interface names given on the command line. Unknown names are
/// kept so they start reporting if the interface shows up later. Rejects a
/// list with no usable names.
pub fn resolve_names(names: &[String], available: &[String]) -> Result<Vec<String>> {
    let mut resolved = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !available.iter().any(|a| a == name) {
            log::warn!("Interface {} not currently present, monitoring anyway", name);
        }
        if !resolved.iter().any(|r: &String| r == name) {
            resolved.push(name.to_string());
        }
    }
    if resolved.is_empty() {
        return Err(Error::Selection("No interface names given".to_string()));
    }
    Ok(resolved)
}

pub fn menu(available: &[String]) -> Vec<String> {
    let rule = "=".repeat(60);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "AVAILABLE NETWORK INTERFACES".to_string(),
        rule.clone(),
    ];
    lines.extend(available.iter().enumerate().map(|(i, name)| format!("{}. {}", i + 1, name)));
    lines.extend([
        String::new(),
        rule.clone(),
        "SELECTION OPTIONS:".to_string(),
        "0 - Monitor ALL interfaces".to_string(),
        "1,2,3 - Monitor specific interfaces (comma-separated)".to_string(),
        "Example: '1,3' to monitor interfaces 1 and 3".to_string(),
        rule,
    ]);
    lines
}

/// Prints the menu and reads selections until one is valid.
pub fn prompt<R: BufRead, W: Write>(available: &[String], input: &mut R, output: &mut W) -> Result<Vec<String>> {
    if available.is_empty() {
        return Err(Error::Selection("No network interfaces found".to_string()));
    }

    for line in menu(available) {
        writeln!(output, "{}", line)?;
    }

    loop {
        write!(output, "\nEnter your selection: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::Selection("Selection cancelled".to_string()));
        }

        match parse_selection(&line, available) {
            Ok(selected) => {
                if line.trim() == "0" {
                    writeln!(output, "\nSelected ALL interfaces ({} total)", selected.len())?;
                } else {
                    writeln!(output, "\nSelected interfaces:")?;
                    for name in &selected {
                        writeln!(output, "   - {}", name)?;
                    }
                }
                return Ok(selected);
            }
            Err(Error::Selection(msg)) => writeln!(output, "{}", msg)?,
            Err(e) => return Err(e),
        }
    }
}
