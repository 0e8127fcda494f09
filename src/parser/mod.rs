// <FILE>src/parser/mod.rs</FILE> - <DESC>Recursive-descent parser for the concrete STL syntax, §4.4</DESC>
// <VERS>VERSION: 1.1.0</VERS>
// <WCTX>Review fixes: operator precedence and identifier-prefix correctness</WCTX>
// <CLOG>Fixed parse_not re-entering parse_temporal so a dangling `!` reaches G/F/X; resolve_ident_as_num now rejects bool_-prefixed names instead of silently renaming them</CLOG>

//! Concrete syntax → typed [`Expr`]. A hand-written precedence ladder, one
//! function per binding level, low to high:
//! `<=>`, `->`, `||`, `&&`, `^`, `U`, unary `G`/`F`/`X`, `!`, comparison,
//! additive, multiplicative, unary `-`.
//!
//! Comparisons sit below the Boolean connectives but above temporal
//! operators, and their operands are a wholly separate numeric grammar
//! (`num_expr`). Since a bare identifier or a parenthesized group can start
//! either a Boolean atom or a numeric comparison, [`Parser::parse_atom`]
//! resolves the ambiguity by speculatively trying the comparison route
//! first and rewinding on failure — the one place this parser backtracks.

mod lexer;

use crate::ast::{
    add, always, and, cmp, div, eventually, iff, implies, literal_bool, literal_float, literal_int,
    mul, neg, next, not, or, sub, until, var_bool, var_float, xor, CmpOp, Expr, Interval,
};
use crate::error::{ArgusError, ParseError, ParseErrorKind};
use lexer::{tokenize, Span, Token};

fn syntax_err(msg: impl Into<String>, span: Span) -> ParseError {
    ParseError::new(ParseErrorKind::Syntax(msg.into()), span)
}

fn type_err(e: ArgusError, span: Span) -> ParseError {
    syntax_err(e.to_string(), span)
}

/// Parse `source` as a single STL formula (§4.4). The result is guaranteed
/// Boolean-kinded: `cmp`/`and`/`or`/... validate this as the tree is built.
pub fn parse_expr(source: &str) -> Result<Expr, ArgusError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_iff()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    fn peek_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    fn check(&self, t: &Token) -> bool {
        self.peek() == t
    }

    fn advance(&mut self) -> Token {
        let t = self.tokens[self.pos].0.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if *self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            let span = self.peek_span();
            Err(syntax_err(
                format!("expected {expected:?}, found {:?}", self.peek()),
                span,
            ))
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if *self.peek() == Token::Eof {
            Ok(())
        } else {
            let span = self.peek_span();
            Err(syntax_err(format!("unexpected trailing token {:?}", self.peek()), span))
        }
    }

    /// `<=>`, left-associative chain of n-ary-free binary `Iff` nodes.
    fn parse_iff(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_implies()?;
        while self.check(&Token::Iff) {
            let span = self.peek_span();
            self.advance();
            let right = self.parse_implies()?;
            left = iff(left, right).map_err(|e| type_err(e, span))?;
        }
        Ok(left)
    }

    /// `->`, right-associative.
    fn parse_implies(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_or()?;
        if self.check(&Token::Implies) {
            let span = self.peek_span();
            self.advance();
            let right = self.parse_implies()?;
            return implies(left, right).map_err(|e| type_err(e, span));
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut operands = vec![self.parse_and()?];
        let mut span = self.peek_span();
        while self.check(&Token::OrOr) {
            span = self.peek_span();
            self.advance();
            operands.push(self.parse_and()?);
        }
        build_nary(or, operands, span)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut operands = vec![self.parse_xor()?];
        let mut span = self.peek_span();
        while self.check(&Token::AndAnd) {
            span = self.peek_span();
            self.advance();
            operands.push(self.parse_xor()?);
        }
        build_nary(and, operands, span)
    }

    fn parse_xor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_until()?;
        while self.check(&Token::Caret) {
            let span = self.peek_span();
            self.advance();
            let right = self.parse_until()?;
            left = xor(left, right).map_err(|e| type_err(e, span))?;
        }
        Ok(left)
    }

    /// `phi U[a,b] psi`, with the interval optional (defaulting to `[0,∞)`).
    fn parse_until(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_temporal()?;
        while self.check(&Token::Until) {
            let span = self.peek_span();
            self.advance();
            let interval = self.parse_optional_interval()?;
            let right = self.parse_temporal()?;
            left = until(interval, left, right).map_err(|e| type_err(e, span))?;
        }
        Ok(left)
    }

    /// Unary `G`/`F` (with optional interval) and `X`. Recurses into itself
    /// so stacked prefixes (`G F a`) parse without an extra level.
    fn parse_temporal(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::Always => {
                let span = self.peek_span();
                self.advance();
                let interval = self.parse_optional_interval()?;
                let phi = self.parse_temporal()?;
                always(interval, phi).map_err(|e| type_err(e, span))
            }
            Token::Eventually => {
                let span = self.peek_span();
                self.advance();
                let interval = self.parse_optional_interval()?;
                let phi = self.parse_temporal()?;
                eventually(interval, phi).map_err(|e| type_err(e, span))
            }
            Token::Next => {
                let span = self.peek_span();
                self.advance();
                let phi = self.parse_temporal()?;
                next(phi).map_err(|e| type_err(e, span))
            }
            _ => self.parse_not(),
        }
    }

    /// A dangling `!` re-enters `parse_temporal`, not `parse_not` itself, so
    /// `!G a`/`!F a`/`!X a` reach the level that recognizes `G`/`F`/`X`
    /// instead of falling straight to `parse_atom` and rejecting them.
    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::Not) {
            let span = self.peek_span();
            self.advance();
            let phi = self.parse_temporal()?;
            return not(phi).map_err(|e| type_err(e, span));
        }
        self.parse_atom()
    }

    /// `cmp_expr | BOOLEAN | ident | "(" bool_expr ")"`. A leading `(` or
    /// identifier is ambiguous between a Boolean atom and the start of a
    /// numeric comparison, so both branches try the comparison parse first.
    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::True => {
                self.advance();
                Ok(literal_bool(true))
            }
            Token::False => {
                self.advance();
                Ok(literal_bool(false))
            }
            Token::LParen => {
                let checkpoint = self.pos;
                if let Ok(node) = self.try_parse_cmp() {
                    return Ok(node);
                }
                self.pos = checkpoint;
                self.expect(Token::LParen)?;
                let inner = self.parse_iff()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => {
                let checkpoint = self.pos;
                if let Ok(node) = self.try_parse_cmp() {
                    return Ok(node);
                }
                self.pos = checkpoint;
                let span = self.peek_span();
                self.advance();
                resolve_ident_as_bool(&name, span)
            }
            Token::Int(_) | Token::Float(_) | Token::Minus => self.try_parse_cmp(),
            other => {
                let span = self.peek_span();
                Err(syntax_err(format!("unexpected token {other:?} in formula position"), span))
            }
        }
    }

    fn try_parse_cmp(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_additive()?;
        let (op, span) = self.expect_cmp_op()?;
        let rhs = self.parse_additive()?;
        cmp(op, lhs, rhs).map_err(|e| type_err(e, span))
    }

    fn expect_cmp_op(&mut self) -> Result<(CmpOp, Span), ParseError> {
        let span = self.peek_span();
        let op = match self.peek() {
            Token::Lt => CmpOp::Lt,
            Token::Le => CmpOp::Le,
            Token::Gt => CmpOp::Gt,
            Token::Ge => CmpOp::Ge,
            Token::EqEq => CmpOp::Eq,
            Token::Ne => CmpOp::Ne,
            other => {
                return Err(syntax_err(
                    format!("expected a comparison operator, found {other:?}"),
                    span,
                ))
            }
        };
        self.advance();
        Ok((op, span))
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let span = self.peek_span();
            match self.peek() {
                Token::Plus => {
                    self.advance();
                    let right = self.parse_multiplicative()?;
                    left = add(left, right).map_err(|e| type_err(e, span))?;
                }
                Token::Minus => {
                    self.advance();
                    let right = self.parse_multiplicative()?;
                    left = sub(left, right).map_err(|e| type_err(e, span))?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary_minus()?;
        loop {
            let span = self.peek_span();
            match self.peek() {
                Token::Star => {
                    self.advance();
                    let right = self.parse_unary_minus()?;
                    left = mul(left, right).map_err(|e| type_err(e, span))?;
                }
                Token::Slash => {
                    self.advance();
                    let right = self.parse_unary_minus()?;
                    left = div(left, right).map_err(|e| type_err(e, span))?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_unary_minus(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::Minus) {
            let span = self.peek_span();
            self.advance();
            let operand = self.parse_unary_minus()?;
            return neg(operand).map_err(|e| type_err(e, span));
        }
        self.parse_num_primary()
    }

    fn parse_num_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::Int(i) => {
                self.advance();
                Ok(literal_int(i))
            }
            Token::Float(f) => {
                self.advance();
                Ok(literal_float(f))
            }
            Token::Ident(name) => {
                let span = self.peek_span();
                self.advance();
                resolve_ident_as_num(&name, span)
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_additive()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => {
                let span = self.peek_span();
                Err(syntax_err(
                    format!("expected a number, variable, or `(`, found {other:?}"),
                    span,
                ))
            }
        }
    }

    /// `"[" INT? "," INT? "]"`. Bounds are milliseconds in the concrete
    /// syntax and converted to seconds here (§4.4); absent means `[0, ∞)`.
    fn parse_optional_interval(&mut self) -> Result<Interval, ParseError> {
        if !self.check(&Token::LBracket) {
            return Ok(Interval::UNBOUNDED);
        }
        let open_span = self.peek_span();
        self.advance();
        let lo_ms = self.parse_optional_interval_bound();
        self.expect(Token::Comma)?;
        let hi_ms = self.parse_optional_interval_bound();
        let close_span = self.peek_span();
        self.expect(Token::RBracket)?;
        let span = (open_span.0, close_span.1);
        let lo = lo_ms.unwrap_or(0) as f64 / 1000.0;
        let hi = hi_ms.map(|ms| ms as f64 / 1000.0).unwrap_or(f64::INFINITY);
        Interval::new(lo, hi).map_err(|e| type_err(e, span))
    }

    fn parse_optional_interval_bound(&mut self) -> Option<i64> {
        match self.peek() {
            Token::Int(n) => {
                let n = *n;
                self.advance();
                Some(n)
            }
            _ => None,
        }
    }
}

fn build_nary(
    ctor: impl Fn(Vec<Expr>) -> Result<Expr, ArgusError>,
    operands: Vec<Expr>,
    span: Span,
) -> Result<Expr, ParseError> {
    if operands.len() == 1 {
        Ok(operands.into_iter().next().unwrap())
    } else {
        ctor(operands).map_err(|e| type_err(e, span))
    }
}

/// `num_`/`bool_` prefixes pick a variable's kind explicitly; an
/// unprefixed identifier defaults to Boolean when it appears as a formula
/// atom (§4.4, supplementing the original grammar's untyped identifiers).
fn resolve_ident_as_bool(name: &str, span: Span) -> Result<Expr, ParseError> {
    if let Some(stripped) = name.strip_prefix("bool_") {
        Ok(var_bool(stripped))
    } else if name.starts_with("num_") {
        Err(syntax_err(
            format!("`{name}` is a numeric variable and cannot stand alone as a formula; compare it to something"),
            span,
        ))
    } else {
        Ok(var_bool(name))
    }
}

/// The numeric counterpart: an unprefixed identifier defaults to a `Float`
/// variable (the Open Question on numeric variable kind inference,
/// resolved in favor of the common case over requiring a `num_` prefix
/// everywhere). A `bool_`-prefixed identifier is rejected here the same way
/// a `num_`-prefixed one is rejected by `resolve_ident_as_bool`: the prefix
/// picks the variable's kind, so a `bool_*` name cannot resolve to a
/// `Float` variable of a different, unprefixed name.
fn resolve_ident_as_num(name: &str, span: Span) -> Result<Expr, ParseError> {
    if let Some(stripped) = name.strip_prefix("num_") {
        Ok(var_float(stripped))
    } else if name.starts_with("bool_") {
        Err(syntax_err(
            format!("`{name}` is a Boolean variable and cannot appear in a numeric expression"),
            span,
        ))
    } else {
        Ok(var_float(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::value::ElemKind;

    #[test]
    fn parses_conjunction() {
        let e = parse_expr("a && b").unwrap();
        assert!(matches!(e, Expr::And(_)));
    }

    #[test]
    fn precedence_and_binds_tighter_than_or() {
        // a || (b && c)
        let e = parse_expr("a || b && c").unwrap();
        match e {
            Expr::Or(operands) => {
                assert_eq!(operands.len(), 2);
                assert!(matches!(operands[1], Expr::And(_)));
            }
            _ => panic!("expected Or at the top"),
        }
    }

    #[test]
    fn implies_is_right_associative() {
        // a -> (b -> c)
        let e = parse_expr("a -> b -> c").unwrap();
        match e {
            Expr::Implies(_, rhs) => assert!(matches!(*rhs, Expr::Implies(..))),
            _ => panic!("expected Implies at the top"),
        }
    }

    #[test]
    fn comparison_builds_cmp_node() {
        let e = parse_expr("num_x < 3.0").unwrap();
        match e {
            Expr::Cmp(CmpOp::Lt, lhs, _) => {
                assert_eq!(lhs.kind(), ExprKind::Numeric(ElemKind::Float));
            }
            _ => panic!("expected Cmp"),
        }
    }

    #[test]
    fn always_with_interval_converts_ms_to_seconds() {
        let e = parse_expr("G[0,2000] a").unwrap();
        match e {
            Expr::Always(interval, _) => {
                assert_eq!(interval.a, 0.0);
                assert_eq!(interval.b, 2.0);
            }
            _ => panic!("expected Always"),
        }
    }

    #[test]
    fn until_with_default_interval_is_unbounded() {
        let e = parse_expr("a U b").unwrap();
        match e {
            Expr::Until(interval, ..) => assert!(interval.is_unbounded()),
            _ => panic!("expected Until"),
        }
    }

    #[test]
    fn nested_temporal_prefixes_stack() {
        let e = parse_expr("G F a").unwrap();
        match e {
            Expr::Always(_, phi) => assert!(matches!(*phi, Expr::Eventually(..))),
            _ => panic!("expected Always(Eventually(..))"),
        }
    }

    #[test]
    fn parenthesized_comparison_inside_boolean_context() {
        let e = parse_expr("(num_x + 1.0 < 2.0) && a").unwrap();
        assert!(matches!(e, Expr::And(_)));
    }

    #[test]
    fn bare_numeric_identifier_rejected_as_formula() {
        let err = parse_expr("num_x").unwrap_err();
        assert!(matches!(err, ArgusError::Parse(_)));
    }

    #[test]
    fn integer_overflow_is_reported() {
        let err = parse_expr("num_x > 99999999999999999999").unwrap_err();
        match err {
            ArgusError::Parse(pe) => assert!(matches!(pe.kind, ParseErrorKind::ParseIntOverflow)),
            _ => panic!("expected a Parse error"),
        }
    }

    #[test]
    fn unary_minus_in_numeric_expr() {
        let e = parse_expr("-num_x > 0").unwrap();
        match e {
            Expr::Cmp(CmpOp::Gt, lhs, _) => assert!(matches!(*lhs, Expr::Neg(_))),
            _ => panic!("expected Cmp"),
        }
    }

    #[test]
    fn dangling_not_reaches_unparenthesized_temporal_operator() {
        let e = parse_expr("!G a").unwrap();
        match e {
            Expr::Not(phi) => assert!(matches!(*phi, Expr::Always(..))),
            _ => panic!("expected Not(Always(..))"),
        }
        let e = parse_expr("!F a").unwrap();
        assert!(matches!(e, Expr::Not(phi) if matches!(*phi, Expr::Eventually(..))));
        let e = parse_expr("!X a").unwrap();
        assert!(matches!(e, Expr::Not(phi) if matches!(*phi, Expr::Next(_))));
    }

    #[test]
    fn double_negation_still_parses() {
        let e = parse_expr("!!a").unwrap();
        assert!(matches!(e, Expr::Not(phi) if matches!(*phi, Expr::Not(_))));
    }

    #[test]
    fn bool_prefixed_identifier_rejected_in_numeric_context() {
        let err = parse_expr("bool_x > 0").unwrap_err();
        assert!(matches!(err, ArgusError::Parse(_)));
    }
}
