use osprey_resolve::{resolve_crate, ResolveError, ResolvedCrate};
use osprey_source::ResolveConfig;
use osprey_syntax::{AstBuilder, Crate, Expr, ExprKind, Item, NodeId, Stmt, Type, TypeKind};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn resolve(krate: &Crate) -> ResolvedCrate {
    resolve_with(krate, &ResolveConfig::default())
}

pub fn resolve_with(krate: &Crate, config: &ResolveConfig) -> ResolvedCrate {
    init_logger();
    resolve_crate(krate, config).expect("resolver bookkeeping is consistent")
}

pub fn assert_clean(resolved: &ResolvedCrate) {
    assert!(resolved.diagnostics.is_empty(), "unexpected errors:\n{}", resolved.diagnostic_summary());
}

/// `fn name() { stmts; tail }`
pub fn fn_with_body(b: &mut AstBuilder, name: &str, stmts: Vec<Stmt>, tail: Option<Expr>) -> Item {
    let mut function = b.function(name);
    function.body = Some(b.block(stmts, tail));
    b.fn_item_from(function)
}

pub fn type_path_id(ty: &Type) -> NodeId {
    match &ty.kind {
        TypeKind::Path(path) => path.id,
        other => panic!("expected a type path, got {other:?}"),
    }
}

pub fn qualified_path_id(ty: &Type) -> NodeId {
    match &ty.kind {
        TypeKind::QualifiedPath(path) => path.id,
        other => panic!("expected a qualified path, got {other:?}"),
    }
}

pub fn expr_path_id(expr: &Expr) -> NodeId {
    match &expr.kind {
        ExprKind::Path(path) => path.id,
        other => panic!("expected a path expression, got {other:?}"),
    }
}

pub fn single_error(resolved: &ResolvedCrate) -> &ResolveError {
    assert_eq!(resolved.diagnostics.len(), 1, "{}", resolved.diagnostic_summary());
    &resolved.diagnostics[0]
}
