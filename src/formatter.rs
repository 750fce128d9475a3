//! Tree dump of a parsed program.
//!
//! One node per line, two spaces of indentation per level. The empty
//! sentinel prints as `nop`.

use std::fmt::Write as _;

use crate::ast::{If, Node, While};

/// Format a parse result as an indented tree.
#[must_use]
pub fn format(tree: Option<&Node>) -> String {
    let mut out = String::new();
    format_optional(&mut out, tree, 0);
    out
}

fn format_optional(out: &mut String, node: Option<&Node>, indent: usize) {
    match node {
        Some(node) => format_node(out, node, indent),
        None => line(out, indent, "nop"),
    }
}

fn format_node(out: &mut String, node: &Node, indent: usize) {
    match node {
        Node::Block(block) => {
            line(out, indent, "block");
            for statement in &block.statements {
                format_node(out, statement, indent + 1);
            }
        }
        Node::LiteralInt(n) => line(out, indent, &format!("(int {})", n.value)),
        Node::LiteralFloat(n) => line(out, indent, &format!("(float {:?})", n.value)),
        Node::LiteralString(n) => line(out, indent, &format!("(string {:?})", n.value)),
        Node::Symbol(n) => line(out, indent, &format!("(symbol {})", n.name)),
        Node::While(n) => format_while(out, n, indent),
        Node::If(n) => format_if(out, n, indent),
    }
}

fn format_while(out: &mut String, node: &While, indent: usize) {
    line(out, indent, "while");
    format_node(out, &node.condition, indent + 1);
    format_optional(out, node.body.as_deref(), indent + 1);
}

fn format_if(out: &mut String, node: &If, indent: usize) {
    for (i, branch) in node.branches.iter().enumerate() {
        line(out, indent, if i == 0 { "if" } else { "elsif" });
        format_node(out, &branch.condition, indent + 1);
        format_optional(out, branch.body.as_ref(), indent + 1);
    }
    if let Some(otherwise) = &node.otherwise {
        line(out, indent, "else");
        format_node(out, otherwise, indent + 1);
    }
}

fn line(out: &mut String, indent: usize, text: &str) {
    let _ = writeln!(out, "{}{text}", "  ".repeat(indent));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    fn dump(input: &str) -> String {
        let tree = parse_str(input).expect("parse failed");
        format(tree.as_ref())
    }

    #[test]
    fn empty_program() {
        assert_eq!(dump("\n"), "nop\n");
    }

    #[test]
    fn literals() {
        assert_eq!(
            dump("1\n2.5\n\"a\\tb\"\nx\n"),
            "block\n  (int 1)\n  (float 2.5)\n  (string \"a\\tb\")\n  (symbol x)\n"
        );
    }

    #[test]
    fn while_with_empty_body() {
        assert_eq!(dump("while x {}\n"), "while\n  (symbol x)\n  nop\n");
    }

    #[test]
    fn if_chain() {
        assert_eq!(
            dump("if a { 1 } elsif b { } else { 3 }\n"),
            "if\n  (symbol a)\n  (int 1)\nelsif\n  (symbol b)\n  nop\nelse\n  (int 3)\n"
        );
    }
}
