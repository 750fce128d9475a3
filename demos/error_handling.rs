//! Demonstrate error handling for invalid input.

fn main() {
    // Unterminated string literal
    match sigo::parse_str("x\n\"unclosed\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(sigo::ParseError::Lex(e)) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.position.line, e.position.column);
        }
        Err(sigo::ParseError::Syntax(e)) => {
            println!("Syntax error: {e}");
        }
    }

    println!();

    // Unclosed block
    match sigo::parse_str("while x {\n  1\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(sigo::ParseError::Lex(e)) => {
            println!("Lex error: {e}");
        }
        Err(sigo::ParseError::Syntax(e)) => {
            println!("Syntax error: {e}");
            println!("  Message: {}", e.message);
            println!("  Token: {}", e.token);
            println!("  Location: line {}, column {}", e.position.line, e.position.column);
        }
    }
}
