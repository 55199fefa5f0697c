use std::io::Write;

/// Prompt on stdout and read one trimmed line from stdin.
pub fn read_input(name: &str) -> String {
    print!("{name}: ");
    let _ = std::io::stdout().flush();

    let mut value = String::new();
    let _ = std::io::stdin().read_line(&mut value);
    value.trim().to_string()
}

/// Same as [`read_input`] without echoing what is typed.
pub fn read_input_hidden(name: &str) -> String {
    rpassword::prompt_password(format!("{name}: ")).unwrap_or_default()
}
