use std::io::Write;

use crossterm::style::{Color, Stylize};

/// Width of the `=` rules around banners and section headers.
pub(crate) const RULE_WIDTH: usize = 60;

const COLOR_START: (u8, u8, u8) = (0x80, 0x4c, 0xff);
const COLOR_MID: (u8, u8, u8) = (0xff, 0x5f, 0xc8);
const COLOR_END: (u8, u8, u8) = (0x3a, 0xa9, 0xff);

pub(crate) fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Writes `title` between two rules, shaded top to bottom when colored.
pub(crate) fn write_banner<W: Write>(
    out: &mut W,
    title: &str,
    use_color: bool,
) -> std::io::Result<()> {
    let lines = [rule(), format!("  {}", title), rule()];
    let denom = lines.len().saturating_sub(1);
    for (idx, line) in lines.iter().enumerate() {
        if use_color {
            let (r, g, b) = tri_gradient_rgb(COLOR_START, COLOR_MID, COLOR_END, idx, denom);
            writeln!(out, "{}", line.as_str().with(Color::Rgb { r, g, b }))?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn gradient_rgb(start: (u8, u8, u8), end: (u8, u8, u8), idx: usize, denom: usize) -> (u8, u8, u8) {
    let denom = i32::try_from(denom.max(1)).unwrap_or(i32::MAX);
    let idx = i32::try_from(idx).unwrap_or(i32::MAX).min(denom);
    let lerp = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        let value = b
            .checked_sub(a)
            .and_then(|delta| delta.checked_mul(idx))
            .and_then(|scaled| scaled.checked_div(denom))
            .and_then(|step| a.checked_add(step))
            .unwrap_or(a);
        u8::try_from(value.clamp(0, 255)).unwrap_or(0)
    };
    (
        lerp(start.0, end.0),
        lerp(start.1, end.1),
        lerp(start.2, end.2),
    )
}

fn tri_gradient_rgb(
    start: (u8, u8, u8),
    mid: (u8, u8, u8),
    end: (u8, u8, u8),
    idx: usize,
    denom: usize,
) -> (u8, u8, u8) {
    let denom = denom.max(1);
    let half = denom / 2;
    if idx <= half {
        gradient_rgb(start, mid, idx, half)
    } else {
        gradient_rgb(
            mid,
            end,
            idx.saturating_sub(half),
            denom.saturating_sub(half),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_banner_has_rules_and_title() -> Result<(), String> {
        let mut out = Vec::new();
        write_banner(&mut out, "Probe", false).map_err(|err| err.to_string())?;
        let text = String::from_utf8(out).map_err(|err| err.to_string())?;
        let expected = format!("{rule}\n  Probe\n{rule}\n", rule = rule());
        if text != expected {
            return Err(format!("Unexpected banner: {:?}", text));
        }
        Ok(())
    }

    #[test]
    fn gradient_endpoints_match_palette() -> Result<(), String> {
        if tri_gradient_rgb(COLOR_START, COLOR_MID, COLOR_END, 0, 2) != COLOR_START {
            return Err("First line should use the start color".to_owned());
        }
        if tri_gradient_rgb(COLOR_START, COLOR_MID, COLOR_END, 2, 2) != COLOR_END {
            return Err("Last line should use the end color".to_owned());
        }
        Ok(())
    }
}
