//! Scan a small program, print its tokens, then print its tree.

fn main() {
    let source = "\
# count down
while n {
  n
}
\"done\"
";

    for item in sigo::Scanner::from_text(source, "demo.sg") {
        match item {
            Ok(tok) => println!("{:>5}  {:<10} {}", tok.position, tok.kind, tok.value),
            Err(e) => {
                eprintln!("{e}");
                return;
            }
        }
    }

    println!();

    match sigo::parse_str(source) {
        Ok(tree) => print!("{}", sigo::format(tree.as_ref())),
        Err(e) => eprintln!("{e}"),
    }
}
