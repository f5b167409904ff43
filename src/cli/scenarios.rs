//! Demo scenarios run by the CLI.
//!
//! Each scenario builds its own scope tree and reports what the flows observed, so the
//! binary can print it and the tests can assert on it.

use crate::context::{
    create_context, create_context_with_default, use_context, with_context, Context,
    DefaultContext,
};
use crate::error::{ContextError, ScenarioError};
use crate::propagator;
use crate::scope::{current_scope, dispatch, dispatch_async};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::sync::LazyLock;
use tracing::{debug, info};

static REQUEST_ID: LazyLock<DefaultContext<String>> =
    LazyLock::new(|| create_context_with_default("request_id", "-".to_string()));

static LEVEL: LazyLock<DefaultContext<usize>> =
    LazyLock::new(|| create_context_with_default("level", 0));

/// What each flow of [`nested_parallel`] resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedReport {
    /// Child that bound its own value
    pub overriding_child: Option<i32>,
    /// Child that only inherited
    pub inheriting_child: Option<i32>,
    /// Parent, read after both children completed
    pub parent_after: Option<i32>,
}

/// A parent binds `x = 1`, then runs two child scopes concurrently: one binds `x = 2`
/// and reads it back, the other only reads. Expected report: 2, 1, 1.
pub async fn nested_parallel() -> Result<NestedReport, ContextError> {
    let x: Context<i32> = create_context("x");

    dispatch_async(async move {
        with_context(&x, 1)?;

        let (overriding, inheriting) = tokio::join!(
            dispatch_async(async {
                with_context(&x, 2)?;
                tokio::task::yield_now().await;
                use_context(&x)
            }),
            dispatch_async(async {
                tokio::task::yield_now().await;
                use_context(&x)
            }),
        );

        let report = NestedReport {
            overriding_child: overriding?,
            inheriting_child: inheriting?,
            parent_after: use_context(&x)?,
        };
        info!(?report, "Nested scenario finished");
        Ok::<_, ContextError>(report)
    })
    .await
}

/// `a` defaults to 2 and `b` is bound to 2 in the outer scope; the result is `a`
/// multiplied by `b` as read from a nested scope, i.e. 4.
pub fn value_threading() -> Result<i32, ScenarioError> {
    let a = create_context_with_default("a", 2);
    let b = create_context::<i32>("b");

    dispatch(|| -> Result<i32, ScenarioError> {
        with_context(&b, 2)?;
        let inner = dispatch(|| read_bound(&b))?;
        let result = a.get() * inner;
        info!(result, "Value threading scenario finished");
        Ok(result)
    })
}

fn read_bound<T: Clone + 'static>(context: &Context<T>) -> Result<T, ScenarioError> {
    use_context(context)?.ok_or_else(|| ScenarioError::Unbound(context.label().to_string()))
}

/// Outcome of [`fanout`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanoutReport {
    pub workers: usize,
    pub depth: usize,
    /// One entry per violated expectation; empty when every flow was isolated
    pub mismatches: Vec<String>,
}

impl FanoutReport {
    pub fn is_isolated(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Spawn `workers` tasks from a root scope. Each binds its own request id, descends
/// `depth` nested scopes incrementing a level counter, and checks at the bottom that it
/// still sees its own request id. The root checks its own binding survived.
pub async fn fanout(workers: usize, depth: usize) -> Result<FanoutReport, ScenarioError> {
    dispatch_async(async move {
        REQUEST_ID.set("root".to_string())?;

        let handles: Vec<_> = (0..workers)
            .map(|index| propagator::spawn(dispatch_async(worker(index, depth))))
            .collect();

        let mut mismatches = Vec::new();
        for joined in join_all(handles).await {
            let problems = joined.map_err(|e| ScenarioError::TaskFailed(e.to_string()))??;
            mismatches.extend(problems);
        }

        let root_value = REQUEST_ID.get();
        if root_value != "root" {
            mismatches.push(format!("root scope sees request id {}", root_value));
        }

        let report = FanoutReport {
            workers,
            depth,
            mismatches,
        };
        info!(
            workers,
            depth,
            isolated = report.is_isolated(),
            "Fan-out scenario finished"
        );
        Ok::<_, ScenarioError>(report)
    })
    .await
}

async fn worker(index: usize, depth: usize) -> Result<Vec<String>, ContextError> {
    let mut problems = Vec::new();
    let expected = format!("req-{}", index);

    let inherited = REQUEST_ID.get();
    if inherited != "root" {
        problems.push(format!("worker {} inherited {}", index, inherited));
    }

    REQUEST_ID.set(expected.clone())?;
    let (level, seen) = descend(depth).await?;

    if seen != expected {
        problems.push(format!("worker {} saw request id {} at the bottom", index, seen));
    }
    if level != depth {
        problems.push(format!("worker {} reached level {} of {}", index, level, depth));
    }
    if LEVEL.get() != 0 {
        problems.push(format!("worker {} sees a level bound by a child", index));
    }
    Ok(problems)
}

fn descend(remaining: usize) -> BoxFuture<'static, Result<(usize, String), ContextError>> {
    dispatch_async(async move {
        LEVEL.update(|level| level + 1)?;
        tokio::task::yield_now().await;
        if let Some(scope) = current_scope() {
            debug!(scope = %scope.id(), depth = scope.depth(), level = LEVEL.get(), "Descending");
        }
        if remaining > 1 {
            descend(remaining - 1).await
        } else {
            Ok((LEVEL.get(), REQUEST_ID.get()))
        }
    })
    .boxed()
}
