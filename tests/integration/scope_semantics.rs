//! Inheritance, override, isolation and default resolution across nested scopes.

use tether::{
    create_context, create_context_with_default, current_scope, dispatch, update_context,
    use_context, with_context, ContextError,
};

#[test]
fn test_scoped_values_in_nested_scopes() {
    let simple = create_context::<i32>("simple");

    dispatch(|| {
        with_context(&simple, 1).unwrap();
        dispatch(|| {
            with_context(&simple, 2).unwrap();
            assert_eq!(use_context(&simple), Ok(Some(2)));
        });
        assert_eq!(use_context(&simple), Ok(Some(1)));
    });

    assert!(use_context(&simple).is_err());
}

#[test]
fn test_child_inherits_parent_value() {
    let simple = create_context::<i32>("simple");

    dispatch(|| {
        with_context(&simple, 1).unwrap();
        dispatch(|| {
            assert_eq!(use_context(&simple), Ok(Some(1)));
            dispatch(|| {
                assert_eq!(use_context(&simple), Ok(Some(1)));
            });
        });
        assert_eq!(use_context(&simple), Ok(Some(1)));
    });
}

#[test]
fn test_override_visible_to_descendants_only() {
    let ctx = create_context::<&'static str>("stage");

    dispatch(|| {
        with_context(&ctx, "v1").unwrap();

        dispatch(|| {
            with_context(&ctx, "v2").unwrap();
            assert_eq!(use_context(&ctx), Ok(Some("v2")));
            dispatch(|| {
                assert_eq!(use_context(&ctx), Ok(Some("v2")));
            });
        });

        dispatch(|| {
            assert_eq!(use_context(&ctx), Ok(Some("v1")));
        });
        assert_eq!(use_context(&ctx), Ok(Some("v1")));
    });
}

#[test]
fn test_sequential_siblings_are_isolated() {
    let ctx = create_context::<u32>("counter");

    dispatch(|| {
        dispatch(|| with_context(&ctx, 10).unwrap());
        dispatch(|| {
            assert_eq!(use_context(&ctx), Ok(None));
        });
        assert_eq!(use_context(&ctx), Ok(None));
    });
}

#[test]
fn test_write_after_child_creation_is_visible_to_later_children() {
    let ctx = create_context::<u32>("late");

    dispatch(|| {
        dispatch(|| assert_eq!(use_context(&ctx), Ok(None)));
        with_context(&ctx, 3).unwrap();
        dispatch(|| assert_eq!(use_context(&ctx), Ok(Some(3))));
    });
}

#[test]
fn test_rebinding_replaces_local_value() {
    let ctx = create_context::<u32>("rebinding");

    dispatch(|| {
        with_context(&ctx, 1).unwrap();
        with_context(&ctx, 2).unwrap();
        assert_eq!(use_context(&ctx), Ok(Some(2)));
        assert_eq!(current_scope().unwrap().local_len(), 1);
    });
}

#[test]
fn test_initial_value_inside_scope() {
    let simple = create_context_with_default("simple", 999);

    dispatch(|| {
        assert_eq!(use_context(&simple), Ok(Some(999)));
        assert_eq!(simple.get(), 999);
    });
}

#[test]
fn test_initial_value_outside_scope_does_not_fail() {
    let simple = create_context_with_default("simple", 2);
    assert_eq!(use_context(&simple), Ok(Some(2)));
    assert_eq!(simple.get(), 2);
}

#[test]
fn test_no_default_no_scope_fails() {
    let ctx = create_context::<String>("tenant");
    let err = use_context(&ctx).unwrap_err();
    assert_eq!(
        err,
        ContextError::NoActiveScopeNoDefault {
            context: "tenant".to_string()
        }
    );
}

#[test]
fn test_write_outside_scope_fails() {
    let ctx = create_context_with_default("tenant", "public".to_string());
    assert!(matches!(
        with_context(&ctx, "acme".to_string()),
        Err(ContextError::NoActiveScope { .. })
    ));
    assert_eq!(ctx.get(), "public");
}

#[test]
fn test_derivation_write_leaves_parent_untouched() {
    let ctx = create_context::<i32>("derived");

    dispatch(|| {
        with_context(&ctx, 5).unwrap();
        dispatch(|| {
            update_context(&ctx, |v| v.unwrap_or_default() + 1).unwrap();
            assert_eq!(use_context(&ctx), Ok(Some(6)));
        });
        assert_eq!(use_context(&ctx), Ok(Some(5)));
    });
}

#[test]
fn test_derivation_extends_inherited_value() {
    let tags = create_context_with_default("tags", Vec::<String>::new());

    dispatch(|| {
        tags.update(|mut t| {
            t.push("service=api".to_string());
            t
        })
        .unwrap();
        dispatch(|| {
            tags.update(|mut t| {
                t.push("request=42".to_string());
                t
            })
            .unwrap();
            assert_eq!(tags.get(), vec!["service=api", "request=42"]);
        });
        assert_eq!(tags.get(), vec!["service=api"]);
    });
    assert!(tags.get().is_empty());
}

#[test]
fn test_same_label_definitions_never_collide() {
    let first = create_context::<u8>("shared-name");
    let second = create_context::<u8>("shared-name");

    dispatch(|| {
        with_context(&first, 1).unwrap();
        assert_eq!(use_context(&first), Ok(Some(1)));
        assert_eq!(use_context(&second), Ok(None));

        with_context(&second, 2).unwrap();
        assert_eq!(use_context(&first), Ok(Some(1)));
        assert_eq!(use_context(&second), Ok(Some(2)));
    });
}

#[test]
fn test_cloned_definition_is_same_slot() {
    let original = create_context::<u8>("cloned");
    let copy = original.clone();

    dispatch(|| {
        with_context(&original, 7).unwrap();
        assert_eq!(use_context(&copy), Ok(Some(7)));
    });
}

#[test]
fn test_deep_nesting_resolves_nearest_binding() {
    let ctx = create_context::<usize>("depth");

    fn nest(ctx: &tether::Context<usize>, level: usize, max: usize) {
        if level % 10 == 0 {
            with_context(ctx, level).unwrap();
        }
        let expected = level - level % 10;
        assert_eq!(use_context(ctx), Ok(Some(expected)));
        assert_eq!(current_scope().unwrap().depth(), level);
        if level < max {
            dispatch(|| nest(ctx, level + 1, max));
        }
    }

    dispatch(|| nest(&ctx, 0, 200));
}
