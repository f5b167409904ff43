//! Arbitrary chains of nested scopes with optional overrides per level.

use proptest::prelude::*;
use tether::{create_context, dispatch, use_context, with_context, Context};

/// Descend one scope per entry, binding where the entry is `Some`, and check every
/// level resolves to the most recent binding on its own chain.
fn check_chain(ctx: &Context<i32>, sibling: &Context<i32>, levels: &[(Option<i32>, i32)], expected: Option<i32>) {
    let Some(((bind, noise), rest)) = levels.split_first() else {
        return;
    };

    dispatch(|| {
        if let Some(value) = bind {
            with_context(ctx, *value).unwrap();
        }
        let expected = bind.or(expected);
        assert_eq!(use_context(ctx), Ok(expected));

        // A sibling writing both contexts must not leak into this chain
        dispatch(|| {
            with_context(ctx, *noise).unwrap();
            with_context(sibling, *noise).unwrap();
        });
        assert_eq!(use_context(ctx), Ok(expected));
        assert_eq!(use_context(sibling), Ok(None));

        check_chain(ctx, sibling, rest, expected);
        assert_eq!(use_context(ctx), Ok(expected));
    });
}

proptest! {
    #[test]
    fn nearest_binding_wins(levels in prop::collection::vec((any::<Option<i32>>(), any::<i32>()), 1..24)) {
        let ctx = create_context::<i32>("chain");
        let sibling = create_context::<i32>("chain");
        check_chain(&ctx, &sibling, &levels, None);
        prop_assert!(use_context(&ctx).is_err());
    }

    #[test]
    fn default_applies_when_nothing_binds(default in any::<i64>(), depth in 1usize..16) {
        let ctx = tether::create_context_with_default("defaulted", default);
        fn descend(ctx: &tether::DefaultContext<i64>, remaining: usize, default: i64) {
            dispatch(|| {
                assert_eq!(ctx.get(), default);
                if remaining > 1 {
                    descend(ctx, remaining - 1, default);
                }
            });
        }
        descend(&ctx, depth, default);
        prop_assert_eq!(ctx.get(), default);
    }
}
