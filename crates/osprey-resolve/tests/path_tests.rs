use expect_test::expect;
use osprey_resolve::ResolveError;
use osprey_syntax::{AstBuilder, Generics, TypeKind};

use crate::common::{assert_clean, expr_path_id, fn_with_body, resolve, single_error, type_path_id};

#[test]
fn crate_prefix_reaches_the_root_from_any_depth() {
    let mut b = AstBuilder::new();
    let x = b.struct_item("X", vec![]);
    let x_id = x.id;

    let deep_ty = b.ty_path(&["crate", "X"]);
    let deep_path = type_path_id(&deep_ty);
    let deep_alias = b.type_alias_item("T", deep_ty);
    let inner = b.module("b", vec![deep_alias]);
    let outer = b.module("a", vec![inner]);

    let root_ty = b.ty_path(&["X"]);
    let root_path = type_path_id(&root_ty);
    let root_alias = b.type_alias_item("U", root_ty);

    let krate = b.finish(vec![x, outer, root_alias]);
    let resolved = resolve(&krate);
    assert_clean(&resolved);
    assert_eq!(resolved.declaration_of(deep_path), Some(x_id));
    assert_eq!(resolved.declaration_of(root_path), Some(x_id));
}

#[test]
fn super_at_the_crate_root_is_an_error() {
    let mut b = AstBuilder::new();
    let x = b.struct_item("X", vec![]);
    let ty = b.ty_path(&["super", "X"]);
    let path_id = type_path_id(&ty);
    let super_span = match &ty.kind {
        TypeKind::Path(path) => path.segments[0].span,
        _ => unreachable!(),
    };
    let alias = b.type_alias_item("T", ty);
    let krate = b.finish(vec![x, alias]);

    let resolved = resolve(&krate);
    assert_eq!(single_error(&resolved), &ResolveError::SuperAtCrateScope { span: super_span });
    assert_eq!(resolved.declaration_of(path_id), None);
}

#[test]
fn super_walks_up_one_module_per_segment() {
    let mut b = AstBuilder::new();
    let z = b.struct_item("Z", vec![]);
    let z_id = z.id;
    let y = b.struct_item("Y", vec![]);
    let y_id = y.id;

    let parent_ty = b.ty_path(&["super", "Y"]);
    let parent_path = type_path_id(&parent_ty);
    let grandparent_ty = b.ty_path(&["super", "super", "Z"]);
    let grandparent_path = type_path_id(&grandparent_ty);
    let first = b.type_alias_item("P", parent_ty);
    let second = b.type_alias_item("G", grandparent_ty);
    let inner = b.module("b", vec![first, second]);
    let outer = b.module("a", vec![y, inner]);

    let krate = b.finish(vec![z, outer]);
    let resolved = resolve(&krate);
    assert_clean(&resolved);
    assert_eq!(resolved.declaration_of(parent_path), Some(y_id));
    assert_eq!(resolved.declaration_of(grandparent_path), Some(z_id));
}

#[test]
fn self_prefix_names_the_current_module() {
    let mut b = AstBuilder::new();
    let helper = b.fn_item("helper");
    let helper_id = helper.id;
    let call = b.expr_path(&["self", "helper"]);
    let call_path = expr_path_id(&call);
    let run = fn_with_body(&mut b, "run", vec![], Some(call));
    let util = b.module("util", vec![helper, run]);
    let krate = b.finish(vec![util]);

    let resolved = resolve(&krate);
    assert_clean(&resolved);
    assert_eq!(resolved.declaration_of(call_path), Some(helper_id));
}

#[test]
fn unknown_name_is_reported_at_its_segment() {
    let mut b = AstBuilder::new();
    let use_site = b.expr_path(&["nosuch"]);
    let path_id = expr_path_id(&use_site);
    let span = match &use_site.kind {
        osprey_syntax::ExprKind::Path(path) => path.segments[0].span,
        _ => unreachable!(),
    };
    let main = fn_with_body(&mut b, "main", vec![], Some(use_site));
    let krate = b.finish(vec![main]);

    let resolved = resolve(&krate);
    assert_eq!(single_error(&resolved), &ResolveError::FailedToResolvePath { name: "nosuch".into(), span });
    assert_eq!(resolved.declaration_of(path_id), None);
}

#[test]
fn missing_child_of_a_module_cannot_be_found() {
    let mut b = AstBuilder::new();
    let empty = b.module("a", vec![]);
    let ty = b.ty_path(&["a", "Missing"]);
    let path_id = type_path_id(&ty);
    let alias = b.type_alias_item("T", ty);
    let krate = b.finish(vec![empty, alias]);

    let resolved = resolve(&krate);
    assert!(matches!(single_error(&resolved), ResolveError::CannotFindPath { path, .. } if path == "Missing"));
    assert_eq!(resolved.declaration_of(path_id), None);
}

#[test]
fn crate_keyword_after_the_first_segment_cannot_be_found() {
    let mut b = AstBuilder::new();
    let module = b.module("a", vec![]);
    let ty = b.ty_path(&["a", "crate"]);
    let alias = b.type_alias_item("T", ty);
    let krate = b.finish(vec![module, alias]);

    let resolved = resolve(&krate);
    assert!(matches!(single_error(&resolved), ResolveError::CannotFindPath { .. }));
}

#[test]
fn malformed_segment_is_reported() {
    let mut b = AstBuilder::new();
    let module = b.module("a", vec![]);
    let head = b.segment("a");
    let broken = b.error_segment();
    let path = b.path_from_segments(vec![head, broken]);
    let ty = b.ty_from_path(path);
    let alias = b.type_alias_item("T", ty);
    let krate = b.finish(vec![module, alias]);

    let resolved = resolve(&krate);
    assert!(matches!(single_error(&resolved), ResolveError::SegmentHasError { .. }));
}

#[test]
fn enum_variant_and_trait_method_resolve_through_their_container() {
    let mut b = AstBuilder::new();
    let variant = b.unit_variant("Red");
    let variant_id = variant.id;
    let color = b.enum_item("Color", vec![variant]);
    let method = b.function("describe");
    let method = b.trait_fn(method);
    let method_id = method.id;
    let describe = b.trait_item("Describe", vec![method]);

    let red = b.expr_path(&["Color", "Red"]);
    let red_path = expr_path_id(&red);
    let callee = b.expr_path(&["Describe", "describe"]);
    let callee_path = expr_path_id(&callee);
    let call = b.call(callee, vec![]);
    let stmt = b.expr_stmt(red);
    let main = fn_with_body(&mut b, "main", vec![stmt], Some(call));

    let krate = b.finish(vec![color, describe, main]);
    let resolved = resolve(&krate);
    assert_clean(&resolved);
    assert_eq!(resolved.declaration_of(red_path), Some(variant_id));
    assert_eq!(resolved.declaration_of(callee_path), Some(method_id));
}

#[test]
fn associated_item_of_a_plain_type_is_left_unresolved() {
    let mut b = AstBuilder::new();
    let s = b.struct_item("S", vec![]);
    let s_id = s.id;
    let callee = b.expr_path(&["S", "new"]);
    let callee_path = expr_path_id(&callee);
    let head_segment = match &callee.kind {
        osprey_syntax::ExprKind::Path(path) => path.segments[0].id,
        _ => unreachable!(),
    };
    let call = b.call(callee, vec![]);
    let main = fn_with_body(&mut b, "main", vec![], Some(call));
    let krate = b.finish(vec![s, main]);

    let resolved = resolve(&krate);
    assert_clean(&resolved);
    assert_eq!(resolved.declaration_of(head_segment), Some(s_id));
    assert_eq!(resolved.declaration_of(callee_path), None);
}

#[test]
fn last_segment_prefers_the_namespace_of_its_position() {
    let mut b = AstBuilder::new();
    let record = b.struct_item("Config", vec![]).public();
    let record_id = record.id;
    let constructor = b.fn_item("Config").public();
    let constructor_id = constructor.id;
    let settings = b.module("settings", vec![record, constructor]);

    let ty = b.ty_path(&["settings", "Config"]);
    let type_use = type_path_id(&ty);
    let alias = b.type_alias_item("Current", ty);
    let value = b.expr_path(&["settings", "Config"]);
    let value_use = expr_path_id(&value);
    let main = fn_with_body(&mut b, "main", vec![], Some(value));

    let krate = b.finish(vec![settings, alias, main]);
    let resolved = resolve(&krate);
    assert_clean(&resolved);
    assert_eq!(resolved.declaration_of(type_use), Some(record_id));
    assert_eq!(resolved.declaration_of(value_use), Some(constructor_id));
}

#[test]
fn qualified_path_gets_the_projection_as_canonical_path() {
    let mut b = AstBuilder::new();
    let my_type = b.struct_item("MyType", vec![]);
    let my_trait = b.trait_item("MyTrait", vec![]);
    let self_ty = b.ty_path(&["MyType"]);
    let trait_path = b.path(&["MyTrait"]);
    let qualified = b.ty_qualified(self_ty, Some(trait_path), "AssocFn", &[]);
    let qualified_id = match &qualified.kind {
        TypeKind::QualifiedPath(path) => path.id,
        _ => unreachable!(),
    };
    let alias = b.type_alias_item("F", qualified);
    let krate = b.finish(vec![my_type, my_trait, alias]);

    let resolved = resolve(&krate);
    assert_clean(&resolved);
    let canonical = resolved.mappings.lookup_qualified_path(qualified_id).map(ToString::to_string);
    assert_eq!(canonical.as_deref(), Some("<MyType as MyTrait>::AssocFn"));
}

#[test]
fn qualified_paths_keep_generic_arguments_and_trailing_segments() {
    let mut b = AstBuilder::new();
    let t = b.type_param("T", vec![]);
    let wrapper = b.struct_item("Wrapper", vec![]).with_generics(Generics::new(vec![t]));
    let a = b.struct_item("A", vec![]);
    let convert = b.trait_item("Convert", vec![]);

    let arg = b.ty_path(&["A"]);
    let self_ty = b.ty_generic("Wrapper", vec![arg]);
    let trait_path = b.path(&["Convert"]);
    let with_trait = b.ty_qualified(self_ty, Some(trait_path), "Output", &["Inner"]);
    let with_trait_id = match &with_trait.kind {
        TypeKind::QualifiedPath(path) => path.id,
        _ => unreachable!(),
    };

    let self_ty = b.ty_path(&["A"]);
    let bare = b.ty_qualified(self_ty, None, "Item", &[]);
    let bare_id = match &bare.kind {
        TypeKind::QualifiedPath(path) => path.id,
        _ => unreachable!(),
    };

    let first = b.type_alias_item("O", with_trait);
    let second = b.type_alias_item("I", bare);
    let krate = b.finish(vec![wrapper, a, convert, first, second]);

    let resolved = resolve(&krate);
    assert_clean(&resolved);
    let rendered = [with_trait_id, bare_id]
        .map(|id| resolved.mappings.lookup_qualified_path(id).map(ToString::to_string).unwrap_or_default())
        .join("\n");
    expect![[r#"
        <Wrapper::<A> as Convert>::Output::Inner
        A::Item"#]]
    .assert_eq(&rendered);
}

#[test]
fn qualified_path_with_unknown_type_is_reported() {
    let mut b = AstBuilder::new();
    let my_trait = b.trait_item("MyTrait", vec![]);
    let self_ty = b.ty_path(&["Ghost"]);
    let trait_path = b.path(&["MyTrait"]);
    let qualified = b.ty_qualified(self_ty, Some(trait_path), "Assoc", &[]);
    let qualified_id = match &qualified.kind {
        TypeKind::QualifiedPath(path) => path.id,
        _ => unreachable!(),
    };
    let alias = b.type_alias_item("F", qualified);
    let krate = b.finish(vec![my_trait, alias]);

    let resolved = resolve(&krate);
    assert!(matches!(single_error(&resolved), ResolveError::FailedToResolvePath { name, .. } if name == "Ghost"));
    assert!(resolved.mappings.lookup_qualified_path(qualified_id).is_none());
}
