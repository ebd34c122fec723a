//! TAS script preprocessor.
//!
//! Expands the shorthand used in hand-written scripts into plain console
//! commands: comment and blank lines go away, `@U nwait niter [usewait]`
//! becomes a `+use`/`-use` ladder, and a line that is a postfix sum of
//! integers (`10 5 +`) becomes that many `wait`s. After a `tas_sba` or
//! `tas_s2y` line the next wait run starts with `exec waitscript.cfg`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: wrong argument type to @U")]
    UseArgument { line: usize },
    #[error("line {line}: @U needs two or three arguments")]
    UseArity { line: usize },
    #[error("line {line}: wrong number of operators: {text}")]
    Operators { line: usize, text: String },
    #[error("line {line}: expression evaluates to < 1: {text}")]
    NonPositive { line: usize, text: String },
}

const WAIT: &str = "wait";
const WAIT_SCRIPT: &str = "exec waitscript.cfg";

/// Evaluates a postfix expression of integers, `+` and `-`. `None` when the
/// line is not such an expression at all.
fn eval_postfix(tokens: &[&str]) -> Option<Vec<i64>> {
    let mut stack: Vec<i64> = Vec::new();
    for token in tokens {
        match *token {
            "+" | "-" => {
                let b = stack.pop()?;
                let a = stack.pop()?;
                stack.push(if *token == "+" { a + b } else { a - b });
            }
            _ => stack.push(token.parse().ok()?),
        }
    }
    Some(stack)
}

fn push_waits(out: &mut Vec<String>, n: i64) {
    out.extend((0..n).map(|_| WAIT.to_string()));
}

fn expand_use(out: &mut Vec<String>, line: usize, args: &[&str]) -> Result<(), ScriptError> {
    if args.len() < 2 {
        return Err(ScriptError::UseArity { line });
    }
    let parse = |s: &str| s.parse::<i64>().map_err(|_| ScriptError::UseArgument { line });
    let nwait = parse(args[0])?;
    let niter = parse(args[1])?;
    let usewait = match args.get(2) {
        Some(s) => parse(s)?,
        None => 1,
    };
    for _ in 0..niter {
        push_waits(out, nwait);
        out.push("+use".to_string());
        push_waits(out, usewait);
        out.push("-use".to_string());
    }
    Ok(())
}

pub fn preprocess(text: &str) -> Result<Vec<String>, ScriptError> {
    let mut out = Vec::new();
    let mut wait_script_armed = false;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens[0] {
            "@U" => {
                expand_use(&mut out, line_no, &tokens[1..])?;
                continue;
            }
            "tas_sba" | "tas_s2y" => {
                wait_script_armed = true;
                out.push(line.to_string());
                continue;
            }
            _ => {}
        }

        let Some(stack) = eval_postfix(&tokens) else {
            out.push(line.to_string());
            if wait_script_armed && line == WAIT {
                wait_script_armed = false;
                out.push(WAIT_SCRIPT.to_string());
            }
            continue;
        };

        let &[value] = stack.as_slice() else {
            return Err(ScriptError::Operators {
                line: line_no,
                text: line.to_string(),
            });
        };
        let mut count = value;
        if count < 1 {
            return Err(ScriptError::NonPositive {
                line: line_no,
                text: line.to_string(),
            });
        }
        if wait_script_armed {
            wait_script_armed = false;
            count -= 1;
            out.push(WAIT.to_string());
            out.push(WAIT_SCRIPT.to_string());
        }
        push_waits(&mut out, count);
    }

    Ok(out)
}
