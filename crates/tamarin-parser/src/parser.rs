use crate::ast::*;
use crate::precedence::{token_to_binary_op, Precedence};
use tamarin_lexer::{Lexer, Token, TokenKind};

/// Parse errors.
///
/// Every error is recoverable: the parser records it and resumes at the
/// next statement boundary, so one pass surfaces every detectable
/// structural error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    #[error("no prefix parse function for {0} found")]
    NoPrefixRule(TokenKind),
    #[error("could not parse {0} as integer")]
    IntegerOverflow(String),
}

/// The Tamarin parser.
///
/// Pulls tokens from the lexer through a two-token lookahead window and
/// builds the AST with recursive-descent statement rules plus Pratt
/// (precedence-climbing) expression parsing.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    /// Create a new parser, priming the two-token lookahead window.
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    /// Get the accumulated parse errors.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Take the accumulated parse errors.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if parsing had errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    // ---
    // Token manipulation
    // ---

    /// Slide the lookahead window forward by one token.
    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advance if the peek token matches, otherwise record an error.
    fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.advance();
            Ok(())
        } else {
            let err = ParseError::UnexpectedToken {
                expected: kind,
                found: self.peek.kind,
            };
            self.errors.push(err.clone());
            Err(err)
        }
    }

    /// The precedence of the peek token, `Lowest` if it cannot continue an
    /// expression.
    fn peek_precedence(&self) -> Precedence {
        Precedence::of_infix_token(self.peek.kind).unwrap_or(Precedence::Lowest)
    }

    /// Skip to the end of the current statement so later statements still
    /// parse after an error.
    fn synchronize(&mut self) {
        while !matches!(
            self.current.kind,
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.advance();
        }
    }

    // ---
    // Program and statements
    // ---

    /// Parse the whole token stream into a program.
    ///
    /// Always drains the stream; statements that failed to parse are
    /// omitted and recorded in the error list, so callers must check
    /// `errors()` independently of the returned value.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => program.statements.push(statement),
                Err(_) => self.synchronize(),
            }
            self.advance();
        }

        program
    }

    /// Parse one statement, leaving the current token on its last token.
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    /// `let <identifier> = <expression>;`
    fn parse_let_statement(&mut self) -> Result<LetStatement, ParseError> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Identifier)?;
        let name = Identifier::from_token(&self.current);

        self.expect_peek(TokenKind::Assign)?;
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Ok(LetStatement { token, name, value })
    }

    /// `return <expression>;`
    fn parse_return_statement(&mut self) -> Result<ReturnStatement, ParseError> {
        let token = self.current.clone();

        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Ok(ReturnStatement { token, value })
    }

    /// A bare expression in statement position, with an optional trailing
    /// semicolon.
    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement, ParseError> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Ok(ExpressionStatement { token, expression })
    }

    /// Statements up to the closing `}` (or end of input), which is left
    /// as the current token.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.advance();
        while !self.current_is(TokenKind::RBrace) && !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(_) => {
                    self.synchronize();
                    if self.current_is(TokenKind::RBrace) {
                        break;
                    }
                }
            }
            self.advance();
        }

        BlockStatement { token, statements }
    }

    // ---
    // Expressions (Pratt parser)
    // ---

    /// Parse an expression that binds at least as tightly as `min`.
    ///
    /// The loop folds infix operators left-associatively: equal-precedence
    /// operators never exceed `min` for their own right-hand side, while
    /// tighter-binding operators are consumed into the right operand
    /// before the pending one completes.
    fn parse_expression(&mut self, min: Precedence) -> Result<Expression, ParseError> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && min < self.peek_precedence() {
            if Precedence::of_infix_token(self.peek.kind).is_none() {
                break;
            }
            self.advance();
            left = self.parse_infix(left)?;
        }

        Ok(left)
    }

    /// Dispatch on the current token to start an expression.
    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        match self.current.kind {
            TokenKind::Identifier => Ok(Expression::Identifier(Identifier::from_token(
                &self.current,
            ))),
            TokenKind::IntLiteral => self.parse_integer_literal(),
            TokenKind::True | TokenKind::False => Ok(Expression::Boolean(BooleanLiteral {
                token: self.current.clone(),
                value: self.current_is(TokenKind::True),
            })),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Fn => self.parse_function_literal(),
            kind => {
                let err = ParseError::NoPrefixRule(kind);
                self.errors.push(err.clone());
                Err(err)
            }
        }
    }

    /// Dispatch on the current (operator) token to continue `left`.
    fn parse_infix(&mut self, left: Expression) -> Result<Expression, ParseError> {
        match self.current.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_integer_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let value: i64 = match token.literal.parse() {
            Ok(value) => value,
            Err(_) => {
                let err = ParseError::IntegerOverflow(token.literal.clone());
                self.errors.push(err.clone());
                return Err(err);
            }
        };
        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let operator = match token.kind {
            TokenKind::Bang => PrefixOp::Not,
            TokenKind::Minus => PrefixOp::Neg,
            // Guarded by the dispatch in parse_prefix.
            kind => unreachable!("prefix rule selected for {kind}"),
        };

        self.advance();
        let operand = self.parse_expression(Precedence::Unary)?;

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            operand: Box::new(operand),
        }))
    }

    /// A binary operator continuing `left`; the right-hand side is parsed
    /// at the operator's own precedence, which chains equal-precedence
    /// operators left-associatively.
    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let operator = match token_to_binary_op(token.kind) {
            Some(operator) => operator,
            // The Pratt loop only dispatches tokens in the infix table.
            None => unreachable!("infix rule selected for {}", token.kind),
        };
        let precedence = Precedence::of_binary(operator);

        self.advance();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    /// `( <expression> )` — grouping overrides natural precedence by
    /// restarting the inner parse at the lowest level.
    fn parse_grouped_expression(&mut self) -> Result<Expression, ParseError> {
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expression)
    }

    /// `if (<condition>) { ... }` with an optional `else { ... }`.
    fn parse_if_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Ok(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// `fn(<parameters>) { ... }`.
    fn parse_function_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement();

        Ok(Expression::Function(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    /// A comma-separated identifier list terminated by `)`. The empty list
    /// is permitted, a trailing comma is not.
    fn parse_function_parameters(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Identifier)?;
        parameters.push(Identifier::from_token(&self.current));

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Identifier)?;
            parameters.push(Identifier::from_token(&self.current));
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    /// `<left>(<arguments>)` — fires when `(` follows a parsed expression,
    /// at the highest precedence level.
    fn parse_call_expression(&mut self, left: Expression) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let arguments = self.parse_call_arguments()?;

        Ok(Expression::Call(CallExpression {
            token,
            function: Box::new(left),
            arguments,
        }))
    }

    /// A comma-separated expression list terminated by `)`.
    fn parse_call_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut arguments = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(arguments);
        }

        self.advance();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse source that is expected to be well-formed.
    fn parse(source: &str) -> Program {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        assert!(
            !parser.has_errors(),
            "unexpected parse errors for {source:?}: {:?}",
            parser.errors()
        );
        program
    }

    /// Parse source and return the program together with its errors.
    fn parse_with_errors(source: &str) -> (Program, Vec<ParseError>) {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        let errors = parser.take_errors();
        (program, errors)
    }

    /// The sole statement of a single-statement program, as an expression.
    fn parse_expression(source: &str) -> Expression {
        let program = parse(source);
        assert_eq!(program.statements.len(), 1, "source: {source:?}");
        match program.statements.into_iter().next().unwrap() {
            Statement::Expression(statement) => statement.expression,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let (program, errors) = parse_with_errors("");
        assert!(program.statements.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_let_statements() {
        let cases = [
            ("let x = 5;", "x", "5"),
            ("let y = true;", "y", "true"),
            ("let foobar = y;", "foobar", "y"),
        ];
        for (source, name, value) in cases {
            let program = parse(source);
            assert_eq!(program.statements.len(), 1);
            let Statement::Let(statement) = &program.statements[0] else {
                panic!("expected let statement, got {:?}", program.statements[0]);
            };
            assert_eq!(statement.token.literal, "let");
            assert_eq!(statement.name.name, name);
            assert_eq!(statement.value.to_string(), value);
        }
    }

    #[test]
    fn test_let_value_matches_standalone_parse() {
        let program = parse("let x = 1 + 2 * 3;");
        let Statement::Let(statement) = &program.statements[0] else {
            panic!("expected let statement");
        };
        let standalone = parse_expression("1 + 2 * 3");
        assert_eq!(statement.value.to_string(), standalone.to_string());
    }

    #[test]
    fn test_return_statements() {
        let program = parse("return 5; return x; return add(1, 2);");
        assert_eq!(program.statements.len(), 3);
        for statement in &program.statements {
            let Statement::Return(statement) = statement else {
                panic!("expected return statement, got {statement:?}");
            };
            assert_eq!(statement.token.literal, "return");
        }
    }

    #[test]
    fn test_identifier_expression() {
        let expression = parse_expression("foobar;");
        let Expression::Identifier(identifier) = expression else {
            panic!("expected identifier, got {expression:?}");
        };
        assert_eq!(identifier.name, "foobar");
        assert_eq!(identifier.token.literal, "foobar");
    }

    #[test]
    fn test_integer_literal_expression() {
        let expression = parse_expression("5;");
        let Expression::Integer(literal) = expression else {
            panic!("expected integer literal, got {expression:?}");
        };
        assert_eq!(literal.value, 5);
        assert_eq!(literal.token.literal, "5");
    }

    #[test]
    fn test_boolean_expressions() {
        for (source, value) in [("true;", true), ("false;", false)] {
            let expression = parse_expression(source);
            let Expression::Boolean(literal) = expression else {
                panic!("expected boolean literal, got {expression:?}");
            };
            assert_eq!(literal.value, value);
        }
    }

    #[test]
    fn test_prefix_expressions() {
        let cases = [
            ("!5;", PrefixOp::Not, "5"),
            ("-15;", PrefixOp::Neg, "15"),
            ("!true;", PrefixOp::Not, "true"),
        ];
        for (source, operator, operand) in cases {
            let expression = parse_expression(source);
            let Expression::Prefix(prefix) = expression else {
                panic!("expected prefix expression, got {expression:?}");
            };
            assert_eq!(prefix.operator, operator);
            assert_eq!(prefix.operand.to_string(), operand);
        }
    }

    #[test]
    fn test_infix_expressions() {
        let cases = [
            ("5 + 5;", BinaryOp::Add),
            ("5 - 5;", BinaryOp::Sub),
            ("5 * 5;", BinaryOp::Mul),
            ("5 / 5;", BinaryOp::Div),
            ("5 < 5;", BinaryOp::Lt),
            ("5 > 5;", BinaryOp::Gt),
            ("5 == 5;", BinaryOp::Eq),
            ("5 != 5;", BinaryOp::NotEq),
        ];
        for (source, operator) in cases {
            let expression = parse_expression(source);
            let Expression::Infix(infix) = expression else {
                panic!("expected infix expression, got {expression:?}");
            };
            assert_eq!(infix.operator, operator);
            assert_eq!(infix.left.to_string(), "5");
            assert_eq!(infix.right.to_string(), "5");
        }
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c", "(a + (b * c))"),
            ("a * b + c", "((a * b) + c)"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
            ("true == true", "(true == true)"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        ];
        for (source, expected) in cases {
            let program = parse(source);
            assert_eq!(program.to_string(), expected, "source: {source:?}");
        }
    }

    #[test]
    fn test_statement_sequence_rendering() {
        let program = parse("3 + 4; -5 * 5");
        assert_eq!(program.to_string(), "(3 + 4) ((-5) * 5)");
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_if_expression() {
        let expression = parse_expression("if (x < y) { x }");
        let Expression::If(expression) = expression else {
            panic!("expected if expression, got {expression:?}");
        };
        assert_eq!(expression.condition.to_string(), "(x < y)");
        assert_eq!(expression.consequence.statements.len(), 1);
        assert!(expression.alternative.is_none());
    }

    #[test]
    fn test_if_else_expression() {
        let expression = parse_expression("if (x < y) { x } else { y }");
        let Expression::If(expression) = expression else {
            panic!("expected if expression, got {expression:?}");
        };
        assert_eq!(expression.consequence.to_string(), "{ x }");
        assert_eq!(expression.alternative.as_ref().unwrap().to_string(), "{ y }");
    }

    #[test]
    fn test_function_literal() {
        let expression = parse_expression("fn(x, y) { x + y; }");
        let Expression::Function(function) = expression else {
            panic!("expected function literal, got {expression:?}");
        };
        let names: Vec<&str> = function.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(function.body.statements.len(), 1);
        assert_eq!(function.body.to_string(), "{ (x + y) }");
    }

    #[test]
    fn test_function_parameter_lists() {
        let cases: [(&str, &[&str]); 3] = [
            ("fn() {};", &[]),
            ("fn(x) {};", &["x"]),
            ("fn(x, y, z) {};", &["x", "y", "z"]),
        ];
        for (source, expected) in cases {
            let expression = parse_expression(source);
            let Expression::Function(function) = expression else {
                panic!("expected function literal, got {expression:?}");
            };
            let names: Vec<&str> =
                function.parameters.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn test_trailing_comma_in_parameters_rejected() {
        let (_, errors) = parse_with_errors("fn(x,) { x }");
        assert!(!errors.is_empty());
        assert!(matches!(
            errors[0],
            ParseError::UnexpectedToken {
                expected: TokenKind::Identifier,
                ..
            }
        ));
    }

    #[test]
    fn test_call_expression() {
        let expression = parse_expression("add(1, 2 * 3, 4 + 5);");
        let Expression::Call(call) = expression else {
            panic!("expected call expression, got {expression:?}");
        };
        assert_eq!(call.function.to_string(), "add");
        let arguments: Vec<String> = call.arguments.iter().map(|a| a.to_string()).collect();
        assert_eq!(arguments, vec!["1", "(2 * 3)", "(4 + 5)"]);
    }

    #[test]
    fn test_call_on_function_literal() {
        let expression = parse_expression("fn(x) { x; }(5)");
        let Expression::Call(call) = expression else {
            panic!("expected call expression, got {expression:?}");
        };
        assert!(matches!(*call.function, Expression::Function(_)));
        assert_eq!(call.arguments.len(), 1);
    }

    #[test]
    fn test_call_binds_tighter_than_infix() {
        let expression = parse_expression("a + add(b, c)");
        let Expression::Infix(infix) = expression else {
            panic!("expected infix expression, got {expression:?}");
        };
        assert!(matches!(*infix.right, Expression::Call(_)));
        assert_eq!(infix.to_string(), "(a + add(b, c))");
    }

    #[test]
    fn test_missing_assign_accumulates_one_error() {
        let (program, errors) = parse_with_errors("let x 5;");
        assert_eq!(program.statements.len(), 0);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            ParseError::UnexpectedToken {
                expected: TokenKind::Assign,
                found: TokenKind::IntLiteral,
            }
        );
        assert_eq!(
            errors[0].to_string(),
            "expected next token to be =, got integer instead"
        );
    }

    #[test]
    fn test_error_does_not_stop_later_statements() {
        let (program, errors) = parse_with_errors("let x 5; let y = 10;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.to_string(), "let y = 10;");
    }

    #[test]
    fn test_multiple_errors_in_one_pass() {
        let (_, errors) = parse_with_errors("let x 5; let = 10; let 838383;");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_no_prefix_rule_error() {
        let (program, errors) = parse_with_errors("+ 5;");
        assert!(program.statements.is_empty());
        assert_eq!(errors, vec![ParseError::NoPrefixRule(TokenKind::Plus)]);
        assert_eq!(
            errors[0].to_string(),
            "no prefix parse function for + found"
        );
    }

    #[test]
    fn test_illegal_token_surfaces_as_parse_error() {
        let (_, errors) = parse_with_errors("@;");
        assert_eq!(errors, vec![ParseError::NoPrefixRule(TokenKind::Illegal)]);
    }

    #[test]
    fn test_integer_overflow() {
        // One past i64::MAX.
        let (program, errors) = parse_with_errors("9223372036854775808;");
        assert!(program.statements.is_empty());
        assert_eq!(
            errors,
            vec![ParseError::IntegerOverflow(
                "9223372036854775808".to_string()
            )]
        );
        assert_eq!(
            errors[0].to_string(),
            "could not parse 9223372036854775808 as integer"
        );
    }

    #[test]
    fn test_missing_closing_paren() {
        let (_, errors) = parse_with_errors("(1 + 2;");
        assert!(!errors.is_empty());
        assert!(matches!(
            errors[0],
            ParseError::UnexpectedToken {
                expected: TokenKind::RParen,
                ..
            }
        ));
    }

    #[test]
    fn test_error_inside_block_keeps_later_statements() {
        let (program, errors) = parse_with_errors("if (x) { let a 1; b } c");
        assert_eq!(errors.len(), 1);
        // The malformed let is dropped; the block and trailing statement
        // survive.
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.to_string(), "if (x) { b } c");
    }

    #[test]
    fn test_round_trip_rendering_is_idempotent() {
        let sources = [
            "let x = 1 + 2 * 3;",
            "return add(1, -2);",
            "if (a < b) { a } else { b }",
            "let f = fn(x, y) { return x * y; };",
            "fn() { 1; 2; 3 }(); let y = 2;",
        ];
        for source in sources {
            let first = parse(source).to_string();
            let second = parse(&first).to_string();
            assert_eq!(first, second, "source: {source:?}");
        }
    }
}
