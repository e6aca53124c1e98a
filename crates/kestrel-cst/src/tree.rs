//! Rule-named parse tree nodes
//!
//! Interior nodes carry a grammar rule name and an ordered child list; leaves
//! are tokens with a terminal kind, source text, and span. Rule and terminal
//! names are plain strings: the consumer dispatches on them and rejects names
//! it does not know, which keeps the tree independent of any one grammar.

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A terminal leaf in the parse tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Terminal kind, e.g. `NUMBER`, `STRING`, `VAR`
    pub kind: String,
    /// Source text of the token, exactly as written (strings keep their quotes)
    pub text: String,
    /// Source location
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(kind: impl Into<String>, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            span,
        }
    }
}

/// An interior rule node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseTree {
    /// Grammar rule name, e.g. `var_decl`, `while_stmt`, `add`
    pub rule: String,
    /// Ordered children (sub-rules and tokens)
    pub children: Vec<Node>,
}

/// A parse tree node: interior rule or terminal leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Tree(ParseTree),
    Token(Token),
}

impl ParseTree {
    /// Create a new rule node
    pub fn new(rule: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            rule: rule.into(),
            children,
        }
    }

    /// Source span covered by this subtree, if it contains any tokens
    pub fn span(&self) -> Option<Span> {
        let mut merged: Option<Span> = None;
        for child in &self.children {
            if let Some(span) = child.span() {
                merged = Some(match merged {
                    Some(acc) => acc.merge(span),
                    None => span,
                });
            }
        }
        merged
    }

    /// Indented dump of the tree, one node per line
    ///
    /// # Examples
    ///
    /// ```
    /// use kestrel_cst::{Node, ParseTree, Span};
    ///
    /// let tree = ParseTree::new(
    ///     "print_cmd",
    ///     vec![Node::token("NUMBER", "42", Span::new(6, 8))],
    /// );
    /// assert_eq!(tree.pretty(), "print_cmd\n  NUMBER \"42\"\n");
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(&mut out, 0);
        out
    }

    fn pretty_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.rule);
        out.push('\n');
        for child in &self.children {
            match child {
                Node::Tree(tree) => tree.pretty_into(out, depth + 1),
                Node::Token(token) => {
                    for _ in 0..=depth {
                        out.push_str("  ");
                    }
                    out.push_str(&format!("{} {:?}\n", token.kind, token.text));
                }
            }
        }
    }
}

impl Node {
    /// Shorthand for an interior rule node
    pub fn tree(rule: impl Into<String>, children: Vec<Node>) -> Node {
        Node::Tree(ParseTree::new(rule, children))
    }

    /// Shorthand for a token leaf
    pub fn token(kind: impl Into<String>, text: impl Into<String>, span: Span) -> Node {
        Node::Token(Token::new(kind, text, span))
    }

    /// View this node as a rule node
    pub fn as_tree(&self) -> Option<&ParseTree> {
        match self {
            Node::Tree(tree) => Some(tree),
            Node::Token(_) => None,
        }
    }

    /// View this node as a token leaf
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Node::Tree(_) => None,
            Node::Token(token) => Some(token),
        }
    }

    /// Rule name for interior nodes, `None` for tokens
    pub fn rule(&self) -> Option<&str> {
        self.as_tree().map(|tree| tree.rule.as_str())
    }

    /// Source span covered by this node
    pub fn span(&self) -> Option<Span> {
        match self {
            Node::Tree(tree) => tree.span(),
            Node::Token(token) => Some(token.span),
        }
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ParseTree {
        ParseTree::new(
            "program",
            vec![Node::tree(
                "var_decl",
                vec![
                    Node::token("VAR", "x", Span::new(4, 5)),
                    Node::tree(
                        "add",
                        vec![
                            Node::token("NUMBER", "1", Span::new(8, 9)),
                            Node::token("NUMBER", "2", Span::new(12, 13)),
                        ],
                    ),
                ],
            )],
        )
    }

    #[test]
    fn test_span_merges_all_tokens() {
        assert_eq!(sample().span(), Some(Span::new(4, 13)));
    }

    #[test]
    fn test_span_of_empty_tree() {
        let tree = ParseTree::new("block", vec![]);
        assert_eq!(tree.span(), None);
    }

    #[test]
    fn test_pretty_indents_by_depth() {
        let expected = "\
program
  var_decl
    VAR \"x\"
    add
      NUMBER \"1\"
      NUMBER \"2\"
";
        assert_eq!(sample().pretty(), expected);
    }

    #[test]
    fn test_node_accessors() {
        let node = Node::tree("block", vec![]);
        assert_eq!(node.rule(), Some("block"));
        assert!(node.as_token().is_none());

        let leaf = Node::token("NIL", "nil", Span::new(0, 3));
        assert!(leaf.as_tree().is_none());
        assert_eq!(leaf.as_token().unwrap().text, "nil");
        assert_eq!(leaf.span(), Some(Span::new(0, 3)));
    }

    #[test]
    fn test_serde_names_rules_and_kinds() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"var_decl\""));
        assert!(json.contains("\"NUMBER\""));

        let back: ParseTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
