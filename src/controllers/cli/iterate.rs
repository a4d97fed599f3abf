use std::io::{self, Write};
use std::ops::ControlFlow;

use thiserror::Error;

use crate::controllers::stepping::{IterationController, RunState};
use crate::core::functions::compiler::ExpressionCompiler;
use crate::core::iteration::request::{IterationRequest, IterationRequestError};
use crate::core::iteration::sign_scan::scan_sign_changes;

#[derive(Debug, Error)]
pub enum IterateCliError {
    #[error(transparent)]
    Request(#[from] IterationRequestError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Runs one root-finding request on its cadence and prints the step table
/// followed by the terminal status.
pub struct IterateCliController<W: Write> {
    out: W,
}

impl<W: Write> IterateCliController<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn run(
        &mut self,
        request: &IterationRequest,
        compiler: &dyn ExpressionCompiler,
    ) -> Result<RunState, IterateCliError> {
        let engine = request.build(compiler)?;
        let config = *engine.config();

        writeln!(self.out, "f(x) = {}", request.expr)?;
        writeln!(self.out, "Method: {}", config.method.display_name())?;

        if config.method.is_bracketing() {
            let bracket = engine.bracket();
            writeln!(self.out, "Bracket: [{}, {}]", bracket.a, bracket.b)?;

            let suggestions = scan_sign_changes(engine.function(), config.range);
            if !suggestions.is_empty() {
                let listed: Vec<String> = suggestions
                    .iter()
                    .map(|b| format!("[{:.2}, {:.2}]", b.a, b.b))
                    .collect();
                writeln!(self.out, "Sign changes: {}", listed.join(" "))?;
            }
        } else {
            writeln!(self.out, "Seeds: x0 = {}, x1 = {}", config.x0, config.x1)?;
        }

        writeln!(self.out, "{:>5}  {:>22}  {:>12}  {:>12}", "n", "x", "f(x)", "err")?;

        let mut controller = IterationController::new(engine);
        let mut written = Ok(());
        let mut n = 0usize;
        let out = &mut self.out;

        let state = controller.run_with_cadence(|outcome| {
            let Some(step) = outcome.step() else {
                return ControlFlow::Continue(());
            };
            n += 1;
            written = writeln!(out, "{n:>5}  {:>22.15}  {:>12.4e}  {:>12.4e}", step.x, step.fx, step.err);
            if written.is_err() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        written?;

        match state {
            RunState::Converged => {
                if let Some(step) = controller.engine().last_step() {
                    writeln!(self.out, "Converged to x = {:.12} after {n} steps", step.x)?;
                }
            }
            RunState::Failed(reason) => writeln!(self.out, "Stopped after {n} steps: {reason}")?,
            RunState::BudgetExhausted => writeln!(self.out, "Step budget exhausted after {n} steps")?,
            RunState::Idle | RunState::Running | RunState::Paused => {
                writeln!(self.out, "Paused after {n} steps")?;
            }
        }

        Ok(state)
    }
}
