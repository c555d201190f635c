//! Expressions, blocks and the local bindings they introduce.

use osprey_syntax::{Block, Expr, ExprKind, Pattern, PatternKind, StmtKind};

use crate::canonical_path::CanonicalPath;
use crate::context::Resolver;
use crate::error::{ResolveError, ResolveResult};

impl Resolver<'_> {
    pub(crate) fn resolve_expr(&mut self, expr: &Expr) -> ResolveResult<()> {
        match &expr.kind {
            ExprKind::Literal(_) => {}
            ExprKind::Path(path) => {
                self.resolve_expr_path(path)?;
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand)?,
            ExprKind::Binary { lhs, rhs, .. } => {
                self.resolve_expr(lhs)?;
                self.resolve_expr(rhs)?;
            }
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee)?;
                for arg in args {
                    self.resolve_expr(arg)?;
                }
            }
            ExprKind::Cast { expr, ty } => {
                self.resolve_expr(expr)?;
                self.resolve_type(ty)?;
            }
            ExprKind::Tuple(elems) => {
                for elem in elems {
                    self.resolve_expr(elem)?;
                }
            }
            ExprKind::Grouped(inner) => self.resolve_expr(inner)?,
            ExprKind::Block(block) => self.resolve_block(block)?,
        }
        Ok(())
    }

    /// Statements run in a fresh frame. A `let` resolves its type and
    /// initializer before binding, so `let x = x;` sees the outer `x`.
    pub(crate) fn resolve_block(&mut self, block: &Block) -> ResolveResult<()> {
        self.with_ribs(block.id, |r| {
            for stmt in &block.stmts {
                match &stmt.kind {
                    StmtKind::Let { pattern, ty, init } => {
                        if let Some(ty) = ty {
                            r.resolve_type(ty)?;
                        }
                        if let Some(init) = init {
                            r.resolve_expr(init)?;
                        }
                        r.declare_pattern(pattern, true)?;
                    }
                    StmtKind::Expr(expr) => r.resolve_expr(expr)?,
                    StmtKind::Empty => {}
                }
            }
            if let Some(tail) = &block.tail {
                r.resolve_expr(tail)?;
            }
            Ok(())
        })
    }

    /// Bind every name in `pattern` in the innermost name frame.
    pub(crate) fn declare_pattern(&mut self, pattern: &Pattern, allow_shadow: bool) -> ResolveResult<()> {
        match &pattern.kind {
            PatternKind::Binding { name, .. } => {
                let path = CanonicalPath::new_seg(pattern.id, name.as_str());
                let diagnostics = &mut self.diagnostics;
                let added = self.name_scope.insert(&path, pattern.id, name.span, allow_shadow, |previous, _, previous_span| {
                    diagnostics.push(ResolveError::DuplicateDefinition {
                        name: previous.to_string(),
                        span: name.span,
                        previous_span,
                    })
                })?;
                if added {
                    self.mappings.insert_canonical_path(pattern.id, path)?;
                }
            }
            PatternKind::Tuple(elems) => {
                for elem in elems {
                    self.declare_pattern(elem, allow_shadow)?;
                }
            }
            PatternKind::Wildcard => {}
        }
        Ok(())
    }
}
