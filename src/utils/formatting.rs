//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Net seconds → human string, es: 02h 25m ou 02:25:10 (short).
pub fn secs2readable(secs: i64, short: bool) -> String {
    let abs = secs.abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    let seconds = abs % 60;

    if short {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}h {:02}m", hours, minutes)
    }
}

/// Quantities keep up to three decimals, trailing zeros trimmed.
pub fn format_quantity(q: f64) -> String {
    let s = format!("{:.3}", q);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Restituisce descrizione e colore ANSI per un codice motivo pausa.
/// Usata nei test e in output human-readable.
pub fn describe_reason(code: &str) -> (String, &'static str) {
    match code.to_uppercase().as_str() {
        "T" => ("Troca de Turno".into(), "\x1b[34m"),
        "A" => ("Almoço".into(), "\x1b[36m"),
        "M" => ("Manutenção".into(), "\x1b[33m"),
        "R" => ("Reunião".into(), "\x1b[35m"),
        "O" => ("Outros".into(), "\x1b[37m"),
        other => (other.to_string(), "\x1b[0m"),
    }
}
