// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::value::Val;
use directive_core::{
    DirectiveApplication, DirectivePipeline, DirectiveRegistry, DirectiveTargets,
    ExecutionContext, ResultStore, binding::field_directives,
};
use serde_json::Value;

/// Bind the directives in `query` to every item of `data`, then run them through `registry`.
pub fn run_query(
    registry: DirectiveRegistry,
    query: &str,
    variables: &[(&str, Val)],
    data: Value,
) -> ExecutionContext {
    let results = ResultStore::from_json(data).unwrap();

    let applications = field_directives(query)
        .unwrap()
        .into_iter()
        .flat_map(|(field, invocations)| {
            let targets = DirectiveTargets::uniform(results.ids(), std::slice::from_ref(&field));
            invocations
                .into_iter()
                .map(move |invocation| DirectiveApplication {
                    invocation,
                    targets: targets.clone(),
                })
        })
        .collect::<Vec<_>>();

    let mut ctx = variables
        .iter()
        .fold(ExecutionContext::new(results), |ctx, (name, value)| {
            ctx.with_variable(*name, value.clone())
        });

    DirectivePipeline::new(registry).execute(&applications, &mut ctx);
    ctx
}

pub fn assert_results(ctx: &ExecutionContext, expected: Value) {
    let actual = ctx.results.to_json().unwrap();

    println!(
        "!! expected: {}",
        serde_json::to_string_pretty(&expected).unwrap()
    );
    println!(
        "!! actual: {}",
        serde_json::to_string_pretty(&actual).unwrap()
    );

    assert_eq!(expected, actual)
}
