//! Source rendering of expression trees.
//!
//! `Display` produces the mathematical notation; [`Expr::to_ascii`]
//! produces the ASCII spelling that round-trips through plain-text tools.

use std::fmt::{self, Write};

use super::{BinaryOp, Expr, ExprKind, Quantifier};

#[derive(Copy, Clone, PartialEq, Eq)]
enum Glyphs {
    Unicode,
    Ascii,
}

impl Glyphs {
    fn op(self, op: BinaryOp) -> &'static str {
        match self {
            Glyphs::Unicode => op.as_symbol(),
            Glyphs::Ascii => op.as_ascii(),
        }
    }

    fn quantifier(self, q: Quantifier) -> &'static str {
        match self {
            Glyphs::Unicode => q.as_symbol(),
            Glyphs::Ascii => q.as_ascii(),
        }
    }

    fn pick(self, unicode: &'static str, ascii: &'static str) -> &'static str {
        match self {
            Glyphs::Unicode => unicode,
            Glyphs::Ascii => ascii,
        }
    }
}

struct Renderer<'a, W: Write> {
    out: &'a mut W,
    glyphs: Glyphs,
}

impl<W: Write> Renderer<'_, W> {
    fn expr(&mut self, expr: &Expr) -> fmt::Result {
        let g = self.glyphs;
        match &expr.kind {
            ExprKind::Number(text) => self.out.write_str(text),
            ExprKind::Bool(b) => self.out.write_str(if *b { "TRUE" } else { "FALSE" }),
            ExprKind::Str(s) => write!(self.out, "{s:?}"),
            ExprKind::BuiltinSet(set) => self.out.write_str(match g {
                Glyphs::Unicode => set.as_symbol(),
                Glyphs::Ascii => set.as_ascii(),
            }),
            ExprKind::Ident(name) => self.out.write_str(name),
            ExprKind::Primed(name) => write!(self.out, "{name}'"),
            ExprKind::Existing => self.out.write_char('@'),
            ExprKind::SelfRef => self.out.write_str("self"),
            ExprKind::Arithmetic { op, left, right }
            | ExprKind::Comparison { op, left, right }
            | ExprKind::Logic { op, left, right }
            | ExprKind::SetAlgebra { op, left, right }
            | ExprKind::BagAlgebra { op, left, right } => {
                self.binary(left, g.op(*op), right)
            }
            ExprKind::Equality {
                negated,
                left,
                right,
            } => {
                let sym = if *negated { g.pick("≠", "/=") } else { "=" };
                self.binary(left, sym, right)
            }
            ExprKind::Membership {
                negated,
                element,
                set,
            } => {
                let sym = if *negated {
                    g.pick("∉", "\\notin")
                } else {
                    g.pick("∈", "\\in")
                };
                self.binary(element, sym, set)
            }
            ExprKind::Not(operand) => {
                self.out.write_str(g.pick("¬", "~"))?;
                self.operand(operand)
            }
            ExprKind::Negate(operand) => {
                self.out.write_char('-')?;
                self.operand(operand)
            }
            ExprKind::SetLiteral(elements) => {
                self.out.write_char('{')?;
                self.list(elements)?;
                self.out.write_char('}')
            }
            ExprKind::TupleLiteral(elements) => {
                self.out.write_str(g.pick("⟨", "<<"))?;
                self.list(elements)?;
                self.out.write_str(g.pick("⟩", ">>"))
            }
            ExprKind::RecordLiteral(fields) => {
                self.out.write_char('[')?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    write!(self.out, "{} {} ", field.name, g.pick("↦", "|->"))?;
                    self.expr(&field.value)?;
                }
                self.out.write_char(']')
            }
            ExprKind::Range { low, high } => self.binary(low, "..", high),
            ExprKind::Quantified {
                quantifier,
                binding,
                body,
            } => {
                write!(self.out, "{} ", g.quantifier(*quantifier))?;
                self.expr(binding)?;
                self.out.write_str(" : ")?;
                self.expr(body)
            }
            ExprKind::SetFilter { binding, predicate } => {
                self.out.write_char('{')?;
                self.expr(binding)?;
                self.out.write_str(" : ")?;
                self.expr(predicate)?;
                self.out.write_char('}')
            }
            ExprKind::SetMap { body, binding } => {
                self.out.write_char('{')?;
                self.expr(body)?;
                self.out.write_str(" : ")?;
                self.expr(binding)?;
                self.out.write_char('}')
            }
            ExprKind::Let { name, value, body } => {
                write!(self.out, "LET {name} {} ", g.pick("≜", "=="))?;
                self.expr(value)?;
                self.out.write_str(" IN ")?;
                self.expr(body)
            }
            ExprKind::Except { base, clauses } => {
                self.out.write_char('[')?;
                self.expr(base)?;
                self.out.write_str(" EXCEPT ")?;
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    write!(self.out, "!.{} = ", clause.field)?;
                    self.expr(&clause.value)?;
                }
                self.out.write_char(']')
            }
            ExprKind::Field { record, field } => {
                self.operand(record)?;
                write!(self.out, ".{field}")
            }
            ExprKind::Index { tuple, index } => {
                self.operand(tuple)?;
                self.out.write_char('[')?;
                self.expr(index)?;
                self.out.write_char(']')
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.out.write_str("IF ")?;
                self.expr(cond)?;
                self.out.write_str(" THEN ")?;
                self.expr(then_branch)?;
                self.out.write_str(" ELSE ")?;
                self.expr(else_branch)
            }
            ExprKind::Case { arms, other } => {
                self.out.write_str("CASE ")?;
                let arrow = g.pick(" → ", " -> ");
                let sep = g.pick(" □ ", " [] ");
                for (i, arm) in arms.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(sep)?;
                    }
                    self.expr(&arm.guard)?;
                    self.out.write_str(arrow)?;
                    self.expr(&arm.body)?;
                }
                if let Some(other) = other {
                    write!(self.out, "{sep}OTHER{arrow}")?;
                    self.expr(other)?;
                }
                Ok(())
            }
            ExprKind::Block(statements) => {
                self.out.write_str("BEGIN ")?;
                for (i, stmt) in statements.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str("; ")?;
                    }
                    self.expr(stmt)?;
                }
                self.out.write_str(" END")
            }
            ExprKind::Assign { name, value } => {
                write!(self.out, "{name}' = ")?;
                self.expr(value)
            }
            ExprKind::Unchanged(names) => {
                self.out.write_str("UNCHANGED ")?;
                if let [single] = names.as_slice() {
                    self.out.write_str(single)
                } else {
                    write!(
                        self.out,
                        "{}{}{}",
                        g.pick("⟨", "<<"),
                        names.join(", "),
                        g.pick("⟩", ">>")
                    )
                }
            }
            ExprKind::BuiltinCall {
                module,
                operation,
                args,
            } => {
                write!(self.out, "_{module}!{operation}(")?;
                self.list(args)?;
                self.out.write_char(')')
            }
        }
    }

    fn binary(&mut self, left: &Expr, op: &str, right: &Expr) -> fmt::Result {
        self.operand(left)?;
        write!(self.out, " {op} ")?;
        self.operand(right)
    }

    fn operand(&mut self, expr: &Expr) -> fmt::Result {
        if expr.is_compound() {
            self.out.write_char('(')?;
            self.expr(expr)?;
            self.out.write_char(')')
        } else {
            self.expr(expr)
        }
    }

    fn list(&mut self, items: &[Expr]) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.expr(item)?;
        }
        Ok(())
    }
}

impl Expr {
    /// Render with ASCII operator spellings only.
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        let mut renderer = Renderer {
            out: &mut out,
            glyphs: Glyphs::Ascii,
        };
        // Writing into a String cannot fail.
        let _ = renderer.expr(self);
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer {
            out: f,
            glyphs: Glyphs::Unicode,
        }
        .expr(self)
    }
}
