//! Compiler and flag selection for the objects of a stack.

use std::path::Path;

use rstest::rstest;
use swstack::diagnostics::codes;
use swstack::model::BuilderLevel;

use crate::helpers::design_fixtures::{DesignFixture, single_stack};
use crate::helpers::stack_assertions::*;

/// `single_stack` with a hardware builder and one software view builder.
fn builders(hardware_cmd: &str, software_cmd: &str, software_replace: bool) -> DesignFixture {
    let mut fixture = single_stack();
    fixture
        .add_cmd_to_view("hardware", "firmware", hardware_cmd, "cSource", "-hw", false)
        .add_cmd_to_view("software", "default", software_cmd, "cSource", "-sw", software_replace)
        .add_file("software", "someFileSet", "foo.c");
    fixture
}

// ============================================================================
// COMPILER PRECEDENCE
// ============================================================================

#[rstest]
#[case::file_wins("file_cc", "set_cc", "view_cc", "file_cc", BuilderLevel::File, "G -hw -sw -s -f")]
#[case::file_set_wins("", "set_cc", "view_cc", "set_cc", BuilderLevel::FileSet, "G -hw -sw -s")]
#[case::view_wins("", "", "view_cc", "view_cc", BuilderLevel::View, "G -hw -sw")]
#[case::hardware_fallback("", "", "", "hw_cc", BuilderLevel::Hardware, "G -hw -sw")]
fn test_compiler_precedence(
    #[case] file_cmd: &str,
    #[case] set_cmd: &str,
    #[case] view_cmd: &str,
    #[case] expected_compiler: &str,
    #[case] expected_level: BuilderLevel,
    #[case] expected_flags: &str,
) {
    let mut fixture = builders("hw_cc", view_cmd, false);
    if !set_cmd.is_empty() {
        fixture.add_file_set_builder("software", "someFileSet", set_cmd, "cSource", "-s", false);
    }
    if !file_cmd.is_empty() {
        fixture.set_file_builder("software", "someFileSet", "foo.c", file_cmd, "-f", false);
    }
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");
    assert_well_formed(stack);

    let object = get_object(stack, "foo.c");
    assert_eq!(object.compiler.as_ref(), expected_compiler);
    assert_eq!(object.compiler_source, Some(expected_level));
    assert_eq!(object.flags, expected_flags);
    assert!(object.included_in_build);
}

#[test]
fn test_base_case_uses_hardware_compiler() {
    let design = builders("hopo", "", false).build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    assert_eq!(part_names(stack), ["software_0", "hardware_0"]);
    assert_eq!(stack.executable_builder(), "hopo");
    assert_eq!(stack.executable_flags(), "G -hw -sw");

    let object = get_object(stack, "foo.c");
    assert_eq!(object.compiler.as_ref(), "hopo");
    assert_eq!(object.flags, "G -hw -sw");
    assert_eq!(object.file_set.as_ref(), "someFileSet");
    assert_eq!(
        object.path.as_deref(),
        Some(Path::new("/lib/software/foo.c"))
    );
}

#[test]
fn test_empty_commands_still_contribute_flags() {
    let mut fixture = builders("super_asm", "", false);
    fixture
        .add_file_set_builder("software", "someFileSet", "", "cSource", "-lrt", false)
        .set_file_builder("software", "someFileSet", "foo.c", "", "-u", false);
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    let object = get_object(stack, "foo.c");
    assert_eq!(object.compiler.as_ref(), "super_asm");
    assert_eq!(object.compiler_source, Some(BuilderLevel::Hardware));
    assert_eq!(object.flags, "G -hw -sw -lrt -u");
}

// ============================================================================
// FLAG REPLACEMENT
// ============================================================================

#[rstest]
#[case::file_replace(false, true, "G -u")]
#[case::file_set_replace(true, false, "G -lrt -u")]
#[case::file_replace_beats_file_set_replace(true, true, "G -u")]
#[case::additive(false, false, "G -hw -sw -lrt -u")]
fn test_flag_replacement(
    #[case] set_replace: bool,
    #[case] file_replace: bool,
    #[case] expected: &str,
) {
    let mut fixture = builders("hopo", "", false);
    fixture
        .add_file_set_builder("software", "someFileSet", "", "cSource", "-lrt", set_replace)
        .set_file_builder("software", "someFileSet", "foo.c", "", "-u", file_replace);
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    assert_eq!(get_object(stack, "foo.c").flags, expected);
}

#[test]
fn test_file_set_replace_without_file_builder() {
    let mut fixture = builders("hopo", "", false);
    fixture.add_file_set_builder("software", "someFileSet", "", "cSource", "-lrt", true);
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    assert_eq!(get_object(stack, "foo.c").flags, "G -lrt");
}

#[test]
fn test_view_replace_narrows_view_segment() {
    let design = builders("hopo", "", true).build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    assert_eq!(get_object(stack, "foo.c").flags, "G -sw");
    // The executable still links with every view flag.
    assert_eq!(stack.executable_flags(), "G -hw -sw");
}

// ============================================================================
// HEADERS AND UNCOMPILED FILES
// ============================================================================

#[test]
fn test_include_file_is_header() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture
        .add_file_typed("software", "someFileSet", "foo.h", "cSource", true)
        .set_file_builder("software", "someFileSet", "foo.h", "special", "-x", false);
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");
    assert_well_formed(stack);

    let header = get_object(stack, "foo.h");
    assert!(header.is_header());
    assert!(!header.included_in_build);
    assert_eq!(header.compiler.as_ref(), "");
    assert_eq!(header.flags, "");
    assert_eq!(compiled_names(stack), ["foo.c"]);
}

#[test]
fn test_file_without_matching_type_is_header() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture
        .add_file_typed("software", "someFileSet", "topSecret.txt", "textFile", false)
        .add_file_typed("software", "someFileSet", "untyped.c", "", false);
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    assert_eq!(stack.objects.len(), 3);
    assert_eq!(compiled_names(stack), ["foo.c"]);
    assert!(get_object(stack, "topSecret.txt").is_header());
    assert!(get_object(stack, "untyped.c").is_header());
}

#[test]
fn test_file_set_builder_for_unsupported_type_is_ignored() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture
        .add_file_set_builder("software", "someFileSet", "tsc", "topSecret", "-t", false)
        .add_file_typed("software", "someFileSet", "hiterbehn.c", "topSecret", false);
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");
    assert_well_formed(stack);

    let secret = get_object(stack, "hiterbehn.c");
    assert!(secret.is_header());
    assert!(!secret.included_in_build);
    assert_eq!(secret.compiler.as_ref(), "");
    assert_eq!(compiled_names(stack), ["foo.c"]);
    // The other-type builder contributes no flags either.
    assert_eq!(get_object(stack, "foo.c").flags, "G -hw -sw");
}

#[test]
fn test_file_command_applies_to_any_type() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture
        .add_file_typed("software", "someFileSet", "logo.png", "image", false)
        .set_file_builder("software", "someFileSet", "logo.png", "bin2c", "", false);
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    let object = get_object(stack, "logo.png");
    assert_eq!(object.compiler.as_ref(), "bin2c");
    assert_eq!(object.flags, "G -hw -sw");
    assert_eq!(compiled_names(stack), ["foo.c", "logo.png"]);
}

// ============================================================================
// FILE ORIGINS
// ============================================================================

#[test]
fn test_hardware_files_follow_software_files() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture
        .add_file_set("hardware", "hwFileSet", "firmware")
        .add_file("hardware", "hwFileSet", "boot.c");
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");
    assert_well_formed(stack);

    assert_eq!(compiled_names(stack), ["foo.c", "boot.c"]);
    let boot = get_object(stack, "boot.c");
    assert_eq!(boot.compiler.as_ref(), "hopo");
    assert!(stack.part_of(boot).is_some_and(|p| p.is_hardware));
    assert_eq!(stack.objects_of("hardware_0").count(), 1);
    assert_eq!(stack.objects_of("software_0").count(), 1);
}

#[test]
fn test_instance_header_set_from_top_component() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture
        .add_top_file("software_0_headers", "array.h", true)
        .add_top_file("software_0_headers", "gen/config.c", false)
        .add_top_file("other_0_headers", "other.h", true);
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    let names: Vec<&str> = stack
        .objects_of("software_0")
        .map(|o| o.file_name.as_ref())
        .collect();
    assert_eq!(names, ["foo.c", "array.h", "config.c"]);

    let generated = get_object(stack, "config.c");
    assert_eq!(generated.file_set.as_ref(), "software_0_headers");
    assert_eq!(generated.compiler.as_ref(), "gcc");
    assert_eq!(
        generated.path.as_deref(),
        Some(Path::new("/lib/master-plan/gen/config.c"))
    );
    assert!(get_object(stack, "array.h").is_header());
}

#[test]
fn test_unresolved_path_keeps_record() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture.add_file("software", "someFileSet", "  ");
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    assert_eq!(stack.objects.len(), 2);
    assert!(!stack.objects[1].has_path());
    assert!(stack.objects[0].has_path());

    assert_eq!(registry.diagnostics().len(), 1);
    let diagnostic = &registry.diagnostics()[0];
    assert_eq!(diagnostic.code, codes::UNRESOLVED_PATH);
    assert_eq!(diagnostic.instance.as_deref(), Some("software_0"));
}

#[test]
fn test_missing_file_set_is_skipped() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture
        .reference_file_set("software", "default", "ghostFileSet")
        .add_file_set("software", "laterFileSet", "default")
        .add_file("software", "laterFileSet", "bar.c");
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    assert_eq!(compiled_names(stack), ["foo.c", "bar.c"]);
    let found: Vec<&str> = registry.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(found, [codes::MISSING_FILE_SET]);
}

#[test]
fn test_absolute_path_ignores_component_directory() {
    let mut fixture = builders("hopo", "gcc", false);
    fixture.add_file("software", "someFileSet", "/opt/vendor/crt0.c");
    let design = fixture.build();
    let registry = resolve(&design);
    let stack = get_stack(&registry, "software_0");

    let object = get_object(stack, "crt0.c");
    assert_eq!(object.path.as_deref(), Some(Path::new("/opt/vendor/crt0.c")));
}
