//! Registry-level behaviour: ordering, lookups and parallel resolution.

use swstack::diagnostics::codes;
use swstack::model::DependencyDirection;
use swstack::stack::StackResolver;
use swstack::{ObjectRecord, ResolverConfig, Stack, StackRegistry, resolve_design};

use crate::helpers::design_fixtures::DesignFixture;
use crate::helpers::stack_assertions::*;

const APPS: usize = 12;

/// Twelve applications on two boards sharing one library component.
///
/// Every fourth application is unmapped, so its stack is abandoned. Each
/// resolved stack carries the application's `main.c` and the library's
/// `lib.c`.
fn farm() -> DesignFixture {
    let mut fixture = DesignFixture::new();
    fixture
        .create_hw_of("board", "board_0", "firmware")
        .create_hw_of("board", "board_1", "firmware")
        .add_cmd_to_view("board", "firmware", "gcc", "cSource", "-mcpu", false)
        .create_sw("lib", "board_0", "default", "lib_0")
        .create_sw("lib", "board_1", "default", "lib_1")
        .add_api("lib", "svc", DependencyDirection::Provider)
        .add_cmd_to_view("lib", "default", "gcc", "cSource", "-fPIC", false)
        .add_file_set("lib", "libsrc", "default")
        .add_file("lib", "libsrc", "lib.c");

    for i in 0..APPS {
        let component = format!("app{i}");
        let instance = format!("app{i}_0");
        let board = match i % 4 {
            3 => String::new(),
            _ => format!("board_{}", i % 2),
        };
        fixture
            .create_sw(&component, &board, "default", &instance)
            .add_api(&component, "uses", DependencyDirection::Requester)
            .add_cmd_to_view(&component, "default", "gcc", "cSource", &format!("-DAPP={i}"), false)
            .add_file_set(&component, "src", "default")
            .add_file(&component, "src", "main.c")
            .add_api_connection(&instance, "uses", &format!("lib_{}", i % 2), "svc");
    }
    fixture
}

type Summary = (String, Vec<String>, Vec<ObjectRecord>, Vec<Vec<usize>>);

fn summary(stack: &Stack) -> Summary {
    (
        stack.name.to_string(),
        part_names(stack).into_iter().map(str::to_string).collect(),
        stack.objects.clone(),
        stack.conflicts.iter().map(|g| g.members.clone()).collect(),
    )
}

fn summaries(registry: &StackRegistry) -> Vec<Summary> {
    registry.iter().map(summary).collect()
}

#[test]
fn test_stacks_follow_design_order() {
    let design = farm().build();
    let registry = resolve(&design);

    let names: Vec<&str> = registry.iter().map(|s| s.name.as_ref()).collect();
    let expected: Vec<String> = (0..APPS)
        .filter(|i| i % 4 != 3)
        .map(|i| format!("app{i}_0"))
        .collect();
    assert_eq!(names, expected);

    for stack in registry.iter() {
        assert_well_formed(stack);
        assert_eq!(stack.parts.len(), 3);
        assert_eq!(compiled_names(stack), ["main.c", "lib.c"]);
    }
}

#[test]
fn test_lookup_by_name() {
    let design = farm().build();
    let registry = resolve(&design);

    let stack = get_stack(&registry, "app5_0");
    assert_eq!(part_names(stack), ["app5_0", "lib_1", "board_1"]);
    assert_eq!(stack.executable_flags(), "G -mcpu -DAPP=5 -fPIC");
    assert!(registry.get("app3_0").is_none());
    assert!(registry.get("lib_0").is_none());
}

#[test]
fn test_abandoned_roots_are_reported_in_order() {
    let design = farm().build();
    let registry = resolve(&design);

    let abandoned: Vec<&str> = registry
        .diagnostics()
        .iter()
        .map(|d| {
            assert_eq!(d.code, codes::NO_HARDWARE_MAPPING);
            d.stack.as_deref().unwrap_or_default()
        })
        .collect();
    assert_eq!(abandoned, ["app3_0", "app7_0", "app11_0"]);
}

#[test]
fn test_parallel_matches_serial() {
    let design = farm().build();
    let serial = resolve(&design);
    let parallel = resolve_design(
        &design,
        ResolverConfig::default().with_global_flags(G).with_parallel(true),
    );

    assert_eq!(summaries(&serial), summaries(&parallel));
    assert_eq!(serial.diagnostics(), parallel.diagnostics());
}

#[test]
fn test_resolution_is_deterministic() {
    let design = farm().build();
    let first = resolve(&design);
    let second = resolve(&design);

    assert_eq!(summaries(&first), summaries(&second));
    assert_eq!(first.diagnostics(), second.diagnostics());
}

#[test]
fn test_resolver_reuses_header_sets_across_passes() {
    let design = farm().build();
    let resolver = StackResolver::new(&design, ResolverConfig::default().with_global_flags(G));

    let first = resolver.resolve();
    let registered = resolver.header_sets().len();
    let second = resolver.resolve();

    // One set per distinct part: nine applications, two libraries, two boards.
    assert_eq!(registered, 13);
    assert_eq!(resolver.header_sets().len(), registered);
    assert_eq!(summaries(&first), summaries(&second));

    let shared = |registry: &StackRegistry| {
        registry
            .get("app0_0")
            .and_then(|s| s.find_part("lib_0"))
            .map(|p| std::sync::Arc::as_ptr(&p.header_set))
    };
    assert_eq!(shared(&first), shared(&second));
}
