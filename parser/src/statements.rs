// Statement grammar. A statement list is a `;`-separated fold that builds
// nested Compound nodes, so the whole program is a single statement tree.

use std::rc::Rc;

use model::Stmt;

use crate::combinators::{BoxedParser, Combine, any_of, exp as fold_separated, lazy, opt};
use crate::expressions::{aexp, bexp, exp};
use crate::utils::{identifier, keyword};

/// stmt_list := stmt (';' stmt)*
pub fn stmt_list() -> BoxedParser<Stmt> {
    let separator = keyword(";").map(|_| Box::new(Stmt::compound) as Combine<Stmt>);
    fold_separated(stmt(), separator)
}

fn stmt() -> BoxedParser<Stmt> {
    any_of(vec![
        assign_stmt(),
        for_stmt(),
        if_stmt(),
        while_stmt(),
        print_stmt(),
        input_stmt(),
        call_stmt(),
        func_stmt(),
    ])
}

fn assign_stmt() -> BoxedParser<Stmt> {
    identifier()
        .skip(keyword("="))
        .then(exp())
        .map(|(name, value)| Stmt::Assign { name, value })
}

fn input_stmt() -> BoxedParser<Stmt> {
    keyword("input").skip_left(identifier()).map(Stmt::Input)
}

fn print_stmt() -> BoxedParser<Stmt> {
    keyword("print").skip_left(exp()).map(Stmt::Print)
}

/// if := 'if' bexp 'then' stmt_list ('else' stmt_list)? 'end'
fn if_stmt() -> BoxedParser<Stmt> {
    keyword("if")
        .skip_left(bexp())
        .skip(keyword("then"))
        .then(lazy(stmt_list))
        .then(opt(keyword("else").skip_left(lazy(stmt_list))))
        .skip(keyword("end"))
        .map(|((cond, then_branch), else_branch)| Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
}

fn while_stmt() -> BoxedParser<Stmt> {
    keyword("while")
        .skip_left(bexp())
        .skip(keyword("do"))
        .then(lazy(stmt_list))
        .skip(keyword("end"))
        .map(|(cond, body)| Stmt::While {
            cond,
            body: Box::new(body),
        })
}

/// for := 'for' ID '=' aexp 'to' aexp 'do' stmt_list 'end'
fn for_stmt() -> BoxedParser<Stmt> {
    keyword("for")
        .skip_left(identifier())
        .skip(keyword("="))
        .then(aexp())
        .skip(keyword("to"))
        .then(aexp())
        .skip(keyword("do"))
        .then(lazy(stmt_list))
        .skip(keyword("end"))
        .map(|(((name, start), end), body)| Stmt::For {
            name,
            start,
            end,
            body: Box::new(body),
        })
}

fn func_stmt() -> BoxedParser<Stmt> {
    keyword("func")
        .skip_left(identifier())
        .skip(keyword("do"))
        .then(lazy(stmt_list))
        .skip(keyword("end"))
        .map(|(name, body)| Stmt::FunctionDecl {
            name,
            body: Rc::new(body),
        })
}

fn call_stmt() -> BoxedParser<Stmt> {
    keyword("call").skip_left(identifier()).map(Stmt::FunctionCall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{Parser, phrase};
    use crate::state::ParseState;
    use lexer::lex;
    use model::{BinaryOp, BoolExpr, Expr, RelOp};

    fn parse_stmt(src: &str) -> Option<Stmt> {
        let state = ParseState::new(lex(src).unwrap());
        phrase(stmt_list()).parse(&state, 0).ok().map(|parsed| parsed.value)
    }

    fn assign(name: &str, value: i64) -> Stmt {
        Stmt::Assign {
            name: name.to_string(),
            value: Expr::Int(value),
        }
    }

    #[test]
    fn semicolons_fold_left_into_compounds() {
        let stmt = parse_stmt("a = 1; b = 2; c = 3").unwrap();
        assert_eq!(
            stmt,
            Stmt::compound(Stmt::compound(assign("a", 1), assign("b", 2)), assign("c", 3))
        );
    }

    #[test]
    fn trailing_semicolon_is_rejected() {
        assert!(parse_stmt("a = 1;").is_none());
    }

    #[test]
    fn if_without_else() {
        let stmt = parse_stmt("if x < 1 then y = 2 end").unwrap();
        let Stmt::If { else_branch, then_branch, .. } = stmt else {
            panic!("expected if statement");
        };
        assert!(else_branch.is_none());
        assert_eq!(*then_branch, assign("y", 2));
    }

    #[test]
    fn if_with_else() {
        let stmt = parse_stmt("if x < 1 then y = 2 else y = 3; z = 4 end").unwrap();
        let Stmt::If { else_branch: Some(else_branch), .. } = stmt else {
            panic!("expected if statement with else");
        };
        assert_eq!(*else_branch, Stmt::compound(assign("y", 3), assign("z", 4)));
    }

    #[test]
    fn empty_then_branch_is_rejected() {
        assert!(parse_stmt("if true then end").is_none());
    }

    #[test]
    fn while_loop() {
        let stmt = parse_stmt("while x < 5 do x = x + 1 end").unwrap();
        assert_eq!(
            stmt,
            Stmt::While {
                cond: BoolExpr::Relop {
                    op: RelOp::Less,
                    left: Expr::Var("x".to_string()),
                    right: Expr::Int(5),
                },
                body: Box::new(Stmt::Assign {
                    name: "x".to_string(),
                    value: Expr::binary(BinaryOp::Add, Expr::Var("x".to_string()), Expr::Int(1)),
                }),
            }
        );
    }

    #[test]
    fn for_loop() {
        let stmt = parse_stmt("for i = 0 to n do print i end").unwrap();
        assert_eq!(
            stmt,
            Stmt::For {
                name: "i".to_string(),
                start: Expr::Int(0),
                end: Expr::Var("n".to_string()),
                body: Box::new(Stmt::Print(Expr::Var("i".to_string()))),
            }
        );
    }

    #[test]
    fn function_declaration_and_call() {
        let stmt = parse_stmt("func greet do print \"hi\" end; call greet").unwrap();
        let Stmt::Compound { first, second } = stmt else {
            panic!("expected compound");
        };
        assert!(matches!(*first, Stmt::FunctionDecl { ref name, .. } if name == "greet"));
        assert_eq!(*second, Stmt::FunctionCall("greet".to_string()));
    }

    #[test]
    fn input_and_print() {
        let stmt = parse_stmt("input name; print name").unwrap();
        assert_eq!(
            stmt,
            Stmt::compound(
                Stmt::Input("name".to_string()),
                Stmt::Print(Expr::Var("name".to_string()))
            )
        );
    }

    #[test]
    fn nested_blocks() {
        let src = "while i < 3 do if i == 1 then print i end; i = i + 1 end";
        let stmt = parse_stmt(src).unwrap();
        let Stmt::While { body, .. } = stmt else {
            panic!("expected while");
        };
        assert!(matches!(*body, Stmt::Compound { .. }));
    }

    #[test]
    fn keyword_cannot_be_assigned() {
        assert!(parse_stmt("end = 1").is_none());
    }

    #[test]
    fn assigning_a_boolean_is_rejected() {
        assert!(parse_stmt("x = 1 < 2").is_none());
    }
}
