use osprey_syntax::NodeId;

use crate::error::{InvariantViolation, ResolveResult};

/// Modules currently open, crate root at the bottom.
#[derive(Debug, Clone, Default)]
pub struct ModuleStack {
    stack: Vec<NodeId>,
}

impl ModuleStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, module: NodeId) {
        log::debug!("entering module {module}");
        self.stack.push(module);
    }

    /// Close `module`, which must be the innermost open module.
    pub fn pop(&mut self, module: NodeId) -> ResolveResult<()> {
        match self.stack.pop() {
            Some(found) if found == module => {
                log::debug!("leaving module {module}");
                Ok(())
            }
            Some(found) => Err(InvariantViolation::UnbalancedModuleStack { expected: module, found }),
            None => Err(InvariantViolation::ModuleStackUnderflow),
        }
    }

    pub fn peek_current(&self) -> ResolveResult<NodeId> {
        self.stack.last().copied().ok_or(InvariantViolation::ModuleStackUnderflow)
    }

    /// The module enclosing the current one; `None` at the crate root.
    pub fn peek_parent(&self) -> Option<NodeId> {
        self.stack.len().checked_sub(2).map(|i| self.stack[i])
    }

    pub fn peek_crate_root(&self) -> ResolveResult<NodeId> {
        self.stack.first().copied().ok_or(InvariantViolation::ModuleStackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peeks_follow_nesting() {
        let mut modules = ModuleStack::new();
        assert_eq!(modules.peek_current(), Err(InvariantViolation::ModuleStackUnderflow));

        modules.push(NodeId(0));
        assert_eq!(modules.peek_parent(), None);
        modules.push(NodeId(5));
        modules.push(NodeId(9));

        assert_eq!(modules.peek_current(), Ok(NodeId(9)));
        assert_eq!(modules.peek_parent(), Some(NodeId(5)));
        assert_eq!(modules.peek_crate_root(), Ok(NodeId(0)));

        modules.pop(NodeId(9)).unwrap();
        assert_eq!(modules.peek_current(), Ok(NodeId(5)));
        assert_eq!(
            modules.pop(NodeId(0)),
            Err(InvariantViolation::UnbalancedModuleStack { expected: NodeId(0), found: NodeId(5) })
        );
    }
}
