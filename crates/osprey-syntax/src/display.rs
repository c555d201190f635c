//! Textual ("as written") rendering of paths, types and expressions.
//!
//! The resolver relies on these strings: generic arguments are canonicalized
//! from their rendered form, not from what they resolve to.

use std::fmt::{self, Display, Write};

use crate::ast::*;

fn join<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for PathIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for GenericArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('<')?;
        join(f, &self.types, ", ")?;
        f.write_char('>')
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ident)?;
        match &self.generic_args {
            Some(args) if !args.types.is_empty() => write!(f, "{args}"),
            _ => Ok(()),
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(f, &self.segments, "::")
    }
}

impl Display for QualifiedPathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.as_trait {
            Some(as_trait) => write!(f, "<{} as {}>", self.self_ty, as_trait),
            None => write!(f, "<{}>", self.self_ty),
        }
    }
}

impl Display for QualifiedPathInType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.qualified, self.associated)?;
        for seg in &self.segments {
            write!(f, "::{seg}")?;
        }
        Ok(())
    }
}

impl Display for TraitBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl Display for TypeParamBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeParamBound::Trait(bound) => write!(f, "{bound}"),
            TypeParamBound::Lifetime(lt) => f.write_str(&lt.name),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Path(path) => write!(f, "{path}"),
            TypeKind::QualifiedPath(path) => write!(f, "{path}"),
            TypeKind::Tuple(elems) if elems.len() == 1 => write!(f, "({},)", elems[0]),
            TypeKind::Tuple(elems) => {
                f.write_char('(')?;
                join(f, elems, ", ")?;
                f.write_char(')')
            }
            TypeKind::Array { elem, size } => write!(f, "[{elem}; {size}]"),
            TypeKind::Slice(elem) => write!(f, "[{elem}]"),
            TypeKind::Reference { mutable: true, inner } => write!(f, "&mut {inner}"),
            TypeKind::Reference { mutable: false, inner } => write!(f, "&{inner}"),
            TypeKind::RawPointer { mutability: PointerMutability::Const, inner } => {
                write!(f, "*const {inner}")
            }
            TypeKind::RawPointer { mutability: PointerMutability::Mut, inner } => {
                write!(f, "*mut {inner}")
            }
            TypeKind::TraitObjectOneBound(bound) => write!(f, "dyn {bound}"),
            TypeKind::TraitObject(bounds) => {
                f.write_str("dyn ")?;
                join(f, bounds, " + ")
            }
            TypeKind::BareFunction { params, ret } => {
                f.write_str("fn(")?;
                let tys: Vec<&Type> = params.iter().map(|p| &p.ty).collect();
                join(f, &tys, ", ")?;
                f.write_char(')')?;
                if let Some(ret) = ret {
                    write!(f, " -> {ret}")?;
                }
                Ok(())
            }
            TypeKind::Inferred => f.write_char('_'),
            TypeKind::Never => f.write_char('!'),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}"),
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Char(c) => write!(f, "{c:?}"),
            Literal::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Path(path) => write!(f, "{path}"),
            ExprKind::Unary { op, operand } => {
                let op = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "!",
                    UnaryOp::Deref => "*",
                };
                write!(f, "{op}{operand}")
            }
            ExprKind::Binary { op, lhs, rhs } => write!(f, "{lhs} {} {rhs}", op.as_str()),
            ExprKind::Call { callee, args } => {
                write!(f, "{callee}(")?;
                join(f, args, ", ")?;
                f.write_char(')')
            }
            ExprKind::Cast { expr, ty } => write!(f, "{expr} as {ty}"),
            ExprKind::Tuple(elems) => {
                f.write_char('(')?;
                join(f, elems, ", ")?;
                f.write_char(')')
            }
            ExprKind::Grouped(inner) => write!(f, "({inner})"),
            ExprKind::Block(block) => write!(f, "{block}"),
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for stmt in &self.stmts {
            match &stmt.kind {
                StmtKind::Let { pattern, ty, init } => {
                    write!(f, "let {pattern}")?;
                    if let Some(ty) = ty {
                        write!(f, ": {ty}")?;
                    }
                    if let Some(init) = init {
                        write!(f, " = {init}")?;
                    }
                    f.write_str("; ")?;
                }
                StmtKind::Expr(expr) => write!(f, "{expr}; ")?,
                StmtKind::Empty => f.write_str("; ")?,
            }
        }
        if let Some(tail) = &self.tail {
            write!(f, "{tail} ")?;
        }
        f.write_char('}')
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternKind::Binding { name, mutable: true } => write!(f, "mut {}", name.name),
            PatternKind::Binding { name, mutable: false } => f.write_str(&name.name),
            PatternKind::Tuple(elems) => {
                f.write_char('(')?;
                join(f, elems, ", ")?;
                f.write_char(')')
            }
            PatternKind::Wildcard => f.write_char('_'),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{AstBuilder, PointerMutability};

    #[test]
    fn renders_types_as_written() {
        let mut b = AstBuilder::new();
        let i32_ty = b.ty_path(&["i32"]);
        let vec_i32 = b.ty_generic("Vec", vec![i32_ty]);
        expect_test::expect!["Vec<i32>"].assert_eq(&vec_i32.to_string());

        let inner = b.ty_path(&["u8"]);
        let slice = b.ty_slice(inner);
        let ptr = b.ty_ptr(PointerMutability::Const, slice);
        expect_test::expect!["*const [u8]"].assert_eq(&ptr.to_string());

        let self_ty = b.ty_path(&["T"]);
        let trait_path = b.path(&["Iterator"]);
        let qualified = b.ty_qualified(self_ty, Some(trait_path), "Item", &[]);
        expect_test::expect!["<T as Iterator>::Item"].assert_eq(&qualified.to_string());

        let size = b.expr_path(&["N"]);
        let elem = b.ty_path(&["u8"]);
        let array = b.ty_array(elem, size);
        expect_test::expect!["[u8; N]"].assert_eq(&array.to_string());
    }

    #[test]
    fn renders_unit_and_tuples() {
        let mut b = AstBuilder::new();
        assert_eq!(b.ty_unit().to_string(), "()");
        let single = vec![b.ty_path(&["A"])];
        assert_eq!(b.ty_tuple(single).to_string(), "(A,)");
        let pair = vec![b.ty_path(&["A"]), b.ty_path(&["B"])];
        assert_eq!(b.ty_tuple(pair).to_string(), "(A, B)");
    }
}
