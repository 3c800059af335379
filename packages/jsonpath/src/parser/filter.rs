//! Filter expression parsing
//!
//! Implements the `?logical-expr` grammar with precedence `||` < `&&` <
//! unary `!` < primary, and the RFC 9535 static rules: only singular
//! queries may be compared, only logical-typed function calls may stand
//! alone or be negated, and only value-typed calls may be compared.

use serde_json::Value;

use super::Parser;
use crate::ast::{
    BasicExpr, CompOp, Comparable, CompareExpr, FilterExpr, LogicalAnd, LogicalOr, PathQuery,
};
use crate::error::{JsonPathError, JsonPathResult};
use crate::functions::FuncType;
use crate::tokens::TokenKind;

impl Parser<'_> {
    /// Parse a filter expression after `?`.
    pub(super) fn parse_filter_expr(&mut self) -> JsonPathResult<FilterExpr> {
        let expr = self.parse_logical_or()?;
        Ok(FilterExpr { expr })
    }

    /// Parse `logical-and-expr *( "||" logical-and-expr )`.
    pub(super) fn parse_logical_or(&mut self) -> JsonPathResult<LogicalOr> {
        let mut ands = vec![self.parse_logical_and()?];
        while self.eat(TokenKind::Or) {
            ands.push(self.parse_logical_and()?);
        }
        Ok(LogicalOr(ands))
    }

    /// Parse `basic-expr *( "&&" basic-expr )`.
    fn parse_logical_and(&mut self) -> JsonPathResult<LogicalAnd> {
        let mut exprs = vec![self.parse_basic_expr()?];
        while self.eat(TokenKind::And) {
            exprs.push(self.parse_basic_expr()?);
        }
        Ok(LogicalAnd(exprs))
    }

    /// Parse a single basic expression: negation, parentheses, function
    /// call, filter query, or literal comparison.
    fn parse_basic_expr(&mut self) -> JsonPathResult<BasicExpr> {
        if self.eat(TokenKind::Not) {
            return self.parse_negated_expr();
        }

        if self.eat(TokenKind::LeftParen) {
            let or = self.parse_logical_or()?;
            if !self.eat(TokenKind::RightParen) {
                return Err(self.error("expected ')'"));
            }
            return Ok(BasicExpr::Paren(or));
        }

        if self.check(TokenKind::Ident) {
            return self.parse_function_test_or_comparison();
        }

        if self.check(TokenKind::At) || self.check(TokenKind::Dollar) {
            return self.parse_query_test_or_comparison();
        }

        if self.peek().kind.is_literal() {
            return self.parse_literal_comparison();
        }

        Err(self.error("expected filter expression"))
    }

    /// Parse the expression after a `!`: a parenthesized expression, a
    /// logical function call, or a filter query as a non-existence test.
    fn parse_negated_expr(&mut self) -> JsonPathResult<BasicExpr> {
        if self.eat(TokenKind::LeftParen) {
            let or = self.parse_logical_or()?;
            if !self.eat(TokenKind::RightParen) {
                return Err(self.error("expected ')'"));
            }
            return Ok(BasicExpr::NotParen(or));
        }

        if self.check(TokenKind::Ident) {
            let call_pos = self.peek().start;
            let call = self.parse_function_expr()?;
            if call.result_type() != FuncType::Logical {
                return Err(JsonPathError::parse(
                    "only logical function results can be negated",
                    call_pos,
                ));
            }
            return Ok(BasicExpr::NegFuncTest(call));
        }

        if self.check(TokenKind::At) || self.check(TokenKind::Dollar) {
            let query = self.parse_filter_query()?;
            return Ok(BasicExpr::NonExist(query));
        }

        Err(self.error("expected expression after '!'"))
    }

    /// Parse a basic expression starting with a function name: either a
    /// comparison with the call on the left, or a bare logical test.
    fn parse_function_test_or_comparison(&mut self) -> JsonPathResult<BasicExpr> {
        let call_pos = self.peek().start;
        let call = self.parse_function_expr()?;

        if self.check_comp_op() {
            self.reject_uncomparable_call(call.result_type())?;
            let op = self.parse_comp_op();
            let right = self.parse_comp_value()?;
            return Ok(BasicExpr::Compare(Box::new(CompareExpr {
                left: Comparable::FuncCall(call),
                op,
                right,
            })));
        }

        if call.result_type() != FuncType::Logical {
            return Err(JsonPathError::parse(
                "value function result must be used in a comparison",
                call_pos,
            ));
        }
        Ok(BasicExpr::FuncTest(call))
    }

    /// Parse a basic expression starting with `@` or `$`: either a
    /// comparison (requiring a singular query) or an existence test.
    fn parse_query_test_or_comparison(&mut self) -> JsonPathResult<BasicExpr> {
        let query = self.parse_filter_query()?;

        if self.check_comp_op() {
            if !query.is_singular() {
                return Err(self.error("non-singular query is not allowed in comparison"));
            }
            let op = self.parse_comp_op();
            let right = self.parse_comp_value()?;
            return Ok(BasicExpr::Compare(Box::new(CompareExpr {
                left: Comparable::Query(query),
                op,
                right,
            })));
        }

        Ok(BasicExpr::Exist(query))
    }

    /// Parse a comparison whose left operand is a literal.
    fn parse_literal_comparison(&mut self) -> JsonPathResult<BasicExpr> {
        let literal = self.parse_literal()?;

        if !self.check_comp_op() {
            return Err(self.error("expected comparison operator"));
        }
        let op = self.parse_comp_op();
        let right = self.parse_comp_value()?;
        Ok(BasicExpr::Compare(Box::new(CompareExpr {
            left: Comparable::Literal(literal),
            op,
            right,
        })))
    }

    /// Parse the right-hand operand of a comparison.
    pub(super) fn parse_comp_value(&mut self) -> JsonPathResult<Comparable> {
        if self.check(TokenKind::Ident) {
            let call_pos = self.peek().start;
            let call = self.parse_function_expr()?;
            self.reject_uncomparable_call(call.result_type())
                .map_err(|err| err.or_position(call_pos))?;
            return Ok(Comparable::FuncCall(call));
        }

        if self.check(TokenKind::At) || self.check(TokenKind::Dollar) {
            let query = self.parse_filter_query()?;
            if !query.is_singular() {
                return Err(self.error("non-singular query is not allowed in comparison"));
            }
            return Ok(Comparable::Query(query));
        }

        if self.peek().kind.is_literal() {
            return Ok(Comparable::Literal(self.parse_literal()?));
        }

        Err(self.error("expected comparable value"))
    }

    /// Only value-typed function results may participate in comparisons.
    fn reject_uncomparable_call(&self, result_type: FuncType) -> JsonPathResult<()> {
        match result_type {
            FuncType::Value => Ok(()),
            FuncType::Logical => Err(self.error("logical function result cannot be compared")),
            FuncType::Nodes => Err(self.error("nodes function result cannot be compared")),
        }
    }

    /// Parse a query inside a filter, anchored at `@` or `$`.
    pub(super) fn parse_filter_query(&mut self) -> JsonPathResult<PathQuery> {
        let root = if self.eat(TokenKind::Dollar) {
            true
        } else if self.eat(TokenKind::At) {
            false
        } else {
            return Err(self.error("expected '$' or '@'"));
        };
        let segments = self.parse_segments()?;
        Ok(PathQuery::new(root, segments))
    }

    /// Parse a literal JSON value: string, integer, number, boolean, null.
    pub(super) fn parse_literal(&mut self) -> JsonPathResult<Value> {
        let token = self.advance();
        match token.kind {
            TokenKind::Str => Ok(Value::String(token.value.unwrap_or_default())),
            TokenKind::Int => {
                let raw = token.text(self.src);
                let n: i64 = raw.parse().map_err(|_| {
                    JsonPathError::parse("integer literal out of range", token.start)
                })?;
                Ok(Value::from(n))
            }
            TokenKind::Number => {
                let raw = token.text(self.src);
                let n: f64 = raw
                    .parse()
                    .map_err(|_| JsonPathError::parse("invalid number literal", token.start))?;
                serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or_else(|| {
                        JsonPathError::parse("number literal out of range", token.start)
                    })
            }
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Null => Ok(Value::Null),
            _ => Err(if token.kind == TokenKind::Eof {
                JsonPathError::parse_at_end("expected literal value")
            } else {
                JsonPathError::parse("expected literal value", token.start)
            }),
        }
    }

    /// Whether the current token is a comparison operator.
    pub(super) fn check_comp_op(&self) -> bool {
        self.peek().kind.is_comparison_operator()
    }

    /// Consume a comparison operator. Callers check with
    /// [`Parser::check_comp_op`] first.
    fn parse_comp_op(&mut self) -> CompOp {
        match self.advance().kind {
            TokenKind::Equal => CompOp::Equal,
            TokenKind::NotEqual => CompOp::NotEqual,
            TokenKind::Less => CompOp::Less,
            TokenKind::LessEqual => CompOp::LessEqual,
            TokenKind::Greater => CompOp::Greater,
            _ => CompOp::GreaterEqual,
        }
    }
}
