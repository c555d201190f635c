use expect_test::expect;
use osprey_resolve::{ResolveError, ResolvedCrate};
use osprey_syntax::{AstBuilder, Generics, PointerMutability};

use crate::common::{assert_clean, qualified_path_id, resolve, single_error, type_path_id};

fn unresolved_names(resolved: &ResolvedCrate) -> Vec<&str> {
    resolved
        .diagnostics
        .iter()
        .map(|error| match error {
            ResolveError::FailedToResolvePath { name, .. } => name.as_str(),
            other => panic!("unexpected error: {other}"),
        })
        .collect()
}

#[test]
fn qualified_paths_over_references_pointers_and_slices() {
    let mut b = AstBuilder::new();
    let foo = b.struct_item("Foo", vec![]);
    let tr = b.trait_item("Tr", vec![]);

    let inner = b.ty_path(&["Foo"]);
    let shared = b.ty_ref(false, inner);
    let inner = b.ty_path(&["Foo"]);
    let unique = b.ty_ref(true, inner);
    let inner = b.ty_path(&["Foo"]);
    let const_ptr = b.ty_ptr(PointerMutability::Const, inner);
    let inner = b.ty_path(&["Foo"]);
    let mut_ptr = b.ty_ptr(PointerMutability::Mut, inner);
    let inner = b.ty_path(&["Foo"]);
    let slice = b.ty_slice(inner);

    let mut items = vec![foo, tr];
    let mut ids = Vec::new();
    for (i, self_ty) in [shared, unique, const_ptr, mut_ptr, slice].into_iter().enumerate() {
        let trait_path = b.path(&["Tr"]);
        let qualified = b.ty_qualified(self_ty, Some(trait_path), "X", &[]);
        ids.push(qualified_path_id(&qualified));
        items.push(b.type_alias_item(&format!("A{i}"), qualified));
    }
    let krate = b.finish(items);

    let resolved = resolve(&krate);
    assert_clean(&resolved);
    let rendered = ids
        .iter()
        .map(|id| resolved.mappings.lookup_qualified_path(*id).map(ToString::to_string).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n");
    expect![[r#"
        <&Foo as Tr>::X
        <&mut Foo as Tr>::X
        <*const Foo as Tr>::X
        <*mut Foo as Tr>::X
        <[Foo] as Tr>::X"#]]
    .assert_eq(&rendered);
}

#[test]
fn trait_impl_for_a_reference_type() {
    let mut b = AstBuilder::new();
    let foo = b.struct_item("Foo", vec![]);
    let foo_id = foo.id;
    let tr = b.trait_item("Tr", vec![]);

    let inner = b.ty_path(&["Foo"]);
    let self_ty = b.ty_ref(true, inner);
    let trait_path = b.path(&["Tr"]);
    let mut go = b.function("go");
    let ret = b.ty_path(&["Self"]);
    let ret_use = type_path_id(&ret);
    go.ret = Some(ret);
    let go = b.impl_fn(go);
    let go_id = go.id;
    let by_mut = b.trait_impl(trait_path, self_ty, vec![go]);
    let by_mut_id = by_mut.id;

    let inner = b.ty_path(&["Foo"]);
    let self_ty = b.ty_ref(false, inner);
    let trait_path = b.path(&["Tr"]);
    let by_ref = b.trait_impl(trait_path, self_ty, vec![]);
    let by_ref_id = by_ref.id;

    let krate = b.finish(vec![foo, tr, by_mut, by_ref]);
    let resolved = resolve(&krate);
    assert_clean(&resolved);
    assert_eq!(resolved.canonical_path_of(by_mut_id).as_deref(), Some("<&mut Foo as Tr>"));
    assert_eq!(resolved.canonical_path_of(go_id).as_deref(), Some("<&mut Foo as Tr>::go"));
    assert_eq!(resolved.canonical_path_of(by_ref_id).as_deref(), Some("<&Foo as Tr>"));
    assert_eq!(resolved.declaration_of(ret_use), Some(foo_id));
}

#[test]
fn names_inside_trait_objects_bare_fns_and_tuples_are_resolved() {
    let mut b = AstBuilder::new();
    let foo = b.struct_item("Foo", vec![]);
    let foo_id = foo.id;
    let show = b.trait_item("Show", vec![]);
    let show_id = show.id;

    let ghost = b.path(&["Ghost"]);
    let one_bound = b.ty_dyn(ghost);
    let one_alias = b.type_alias_item("D", one_bound);

    let show_path = b.path(&["Show"]);
    let show_use = show_path.id;
    let phantom = b.path(&["Phantom"]);
    let bound_list = b.ty_dyn_bounds(vec![show_path, phantom]);
    let list_alias = b.type_alias_item("E", bound_list);

    let param = b.ty_path(&["Foo"]);
    let param_use = type_path_id(&param);
    let missing_param = b.ty_path(&["Spectre"]);
    let ret = b.ty_path(&["Foo"]);
    let bare_fn = b.ty_bare_fn(vec![param, missing_param], Some(ret));
    let fn_alias = b.type_alias_item("F", bare_fn);

    let first = b.ty_path(&["Foo"]);
    let first_use = type_path_id(&first);
    let second = b.ty_path(&["Wraith"]);
    let pair = b.ty_tuple(vec![first, second]);
    let pair_alias = b.type_alias_item("P", pair);

    let krate = b.finish(vec![foo, show, one_alias, list_alias, fn_alias, pair_alias]);
    let resolved = resolve(&krate);
    assert_eq!(unresolved_names(&resolved), ["Ghost", "Phantom", "Spectre", "Wraith"]);
    assert_eq!(resolved.declaration_of(show_use), Some(show_id));
    assert_eq!(resolved.declaration_of(param_use), Some(foo_id));
    assert_eq!(resolved.declaration_of(first_use), Some(foo_id));
}

#[test]
fn type_parameter_defaults_are_resolved() {
    let mut b = AstBuilder::new();
    let foo = b.struct_item("Foo", vec![]);
    let foo_id = foo.id;

    let known = b.ty_path(&["Foo"]);
    let known_use = type_path_id(&known);
    let param = b.type_param_with_default("T", vec![], known);
    let field = b.ty_path(&["T"]);
    let holder = b.struct_item("Holder", vec![("value", field)]).with_generics(Generics::new(vec![param]));

    let unknown = b.ty_path(&["Ghost"]);
    let param = b.type_param_with_default("T", vec![], unknown);
    let broken = b.struct_item("Broken", vec![]).with_generics(Generics::new(vec![param]));

    let krate = b.finish(vec![foo, holder, broken]);
    let resolved = resolve(&krate);
    assert!(matches!(single_error(&resolved), ResolveError::FailedToResolvePath { name, .. } if name == "Ghost"));
    assert_eq!(resolved.declaration_of(known_use), Some(foo_id));
}
