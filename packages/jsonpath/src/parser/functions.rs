//! Function call parsing, argument typing, and validation
//!
//! Each argument is classified at parse time as one of the [`ArgType`]
//! tags. Validation runs in three steps: a provisional pass with the raw
//! tags, a recursive pass that substitutes each nested call's declared
//! result type, and the two-pass resolution that re-tags a singular query
//! as a node-list argument whenever the function accepts one, so that
//! `count(@.x)` receives the node list rather than a scalar.

use super::Parser;
use crate::ast::{FuncArgExpr, FuncExpr};
use crate::error::{JsonPathError, JsonPathResult};
use crate::functions::{ArgType, FuncType};
use crate::tokens::TokenKind;

impl Parser<'_> {
    /// Parse a function call; the current token must be the name
    /// identifier.
    pub(super) fn parse_function_expr(&mut self) -> JsonPathResult<FuncExpr> {
        let name_token = self.advance();
        let name = name_token.text(self.src).to_string();

        self.require_adjacent(&name)?;
        if !self.eat(TokenKind::LeftParen) {
            return Err(self.error("expected '(' after function name"));
        }

        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_function_arg()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        if !self.eat(TokenKind::RightParen) {
            return Err(self.error("expected ')' or ','"));
        }

        let func = self.registry.lookup(&name).cloned().ok_or_else(|| {
            JsonPathError::parse(format!("unknown function {name}()"), name_token.start)
        })?;

        // Classify each argument expression.
        let mut arg_types: Vec<ArgType> = args
            .iter()
            .map(|arg| match arg {
                FuncArgExpr::Literal(_) => ArgType::Literal,
                FuncArgExpr::Query(query) => {
                    if query.is_singular() {
                        ArgType::SingularQuery
                    } else {
                        ArgType::FilterQuery
                    }
                }
                FuncArgExpr::Call(_) => ArgType::FunctionCall,
                FuncArgExpr::Logical(_) => ArgType::Logical,
            })
            .collect();

        // Provisional validation; nested calls are accepted as-is here.
        func.validate(&arg_types)
            .map_err(|err| err.or_position(name_token.start))?;

        // Recursive validation: each nested call must be acceptable under
        // the tag implied by its declared result type.
        let mut effective = arg_types.clone();
        for (i, arg) in args.iter().enumerate() {
            if let FuncArgExpr::Call(call) = arg {
                effective[i] = match call.result_type() {
                    FuncType::Logical => ArgType::Logical,
                    FuncType::Value => ArgType::Literal,
                    FuncType::Nodes => ArgType::FilterQuery,
                };
            }
        }
        if effective != arg_types {
            func.validate(&effective)
                .map_err(|err| err.or_position(name_token.start))?;
        }

        // Two-pass resolution: when a singular query would also be accepted
        // as a node list, the parameter expects nodes. The evaluator passes
        // the raw node list for slots tagged FilterQuery.
        for i in 0..arg_types.len() {
            if arg_types[i] != ArgType::SingularQuery {
                continue;
            }
            let mut probe = effective.clone();
            probe[i] = ArgType::FilterQuery;
            if func.validate(&probe).is_ok() {
                arg_types[i] = ArgType::FilterQuery;
                effective[i] = ArgType::FilterQuery;
            }
        }

        Ok(FuncExpr::new(name, func, arg_types, args))
    }

    /// Parse one function argument: a literal, a path query, a nested
    /// call, or a logical expression. A query, literal, or call followed
    /// by a comparison or logical operator re-parses as a logical
    /// expression so that well-typed custom functions can take
    /// LogicalType arguments.
    fn parse_function_arg(&mut self) -> JsonPathResult<FuncArgExpr> {
        let save = self.pos;

        match self.peek().kind {
            TokenKind::At | TokenKind::Dollar => {
                let query = self.parse_filter_query()?;
                if self.continues_as_logical() {
                    self.pos = save;
                    Ok(FuncArgExpr::Logical(self.parse_logical_or()?))
                } else {
                    Ok(FuncArgExpr::Query(query))
                }
            }
            kind if kind.is_literal() => {
                let literal = self.parse_literal()?;
                if self.continues_as_logical() {
                    self.pos = save;
                    Ok(FuncArgExpr::Logical(self.parse_logical_or()?))
                } else {
                    Ok(FuncArgExpr::Literal(literal))
                }
            }
            TokenKind::Ident => {
                let call = self.parse_function_expr()?;
                if self.continues_as_logical() {
                    self.pos = save;
                    Ok(FuncArgExpr::Logical(self.parse_logical_or()?))
                } else {
                    Ok(FuncArgExpr::Call(call))
                }
            }
            TokenKind::Not | TokenKind::LeftParen => {
                Ok(FuncArgExpr::Logical(self.parse_logical_or()?))
            }
            _ => Err(self.error("expected function argument")),
        }
    }

    /// Whether the parsed argument prefix continues as a logical
    /// expression rather than standing alone.
    fn continues_as_logical(&self) -> bool {
        let kind = self.peek().kind;
        matches!(kind, TokenKind::And | TokenKind::Or) || kind.is_comparison_operator()
    }
}
