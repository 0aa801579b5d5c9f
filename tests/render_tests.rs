//! Text-rendering ordering and blank-line rules

mod common;

use common::populated_section;
use eplfile::{CodeSection, IdToNameMap};

fn render(section: &CodeSection, write_methods: bool, write_code: bool) -> String {
    let mut out = String::new();
    section.to_text_code(&IdToNameMap::new(), &mut out, 0, write_methods, write_code);
    out
}

#[test]
fn globals_and_classes_only_yields_exactly_one_blank_line() {
    let mut section = populated_section();
    section.dll_declares.clear();
    section.structs.clear();

    let out = render(&section, false, false);
    assert_eq!(out.matches("\n\n").count(), 1);
    // the blank line sits after the global-variable block
    let globals_end = out.find(".class").unwrap();
    assert!(out[..globals_end].ends_with("\n\n"));
}

#[test]
fn empty_optional_lists_contribute_nothing() {
    let mut section = populated_section();
    section.global_variables.clear();
    section.dll_declares.clear();
    section.structs.clear();

    let out = render(&section, false, false);
    assert!(out.starts_with(".class"));
    assert!(!out.contains("\n\n"));
}

#[test]
fn all_blocks_present_are_separated_by_single_blank_lines() {
    let section = populated_section();
    let out = render(&section, false, false);

    assert_eq!(out.matches("\n\n").count(), 3);
    let global_pos = out.find(".global").unwrap();
    let class_pos = out.find(".class").unwrap();
    let dll_pos = out.find(".dll_cmd").unwrap();
    let struct_pos = out.find(".struct").unwrap();
    assert!(global_pos < class_pos);
    assert!(class_pos < dll_pos);
    assert!(dll_pos < struct_pos);
}

#[test]
fn empty_section_renders_empty_string() {
    let section = CodeSection::new();
    assert!(render(&section, true, true).is_empty());
}

#[test]
fn write_methods_inlines_class_methods() {
    let section = populated_section();

    let without = render(&section, false, true);
    assert!(!without.contains(".method"));

    let with = render(&section, true, true);
    assert!(with.contains(".method startup"));
    assert!(with.contains("; 2-byte compiled body"));
}

#[test]
fn write_code_false_omits_bodies() {
    let section = populated_section();
    let out = render(&section, true, false);
    assert!(out.contains(".method startup"));
    assert!(!out.contains("compiled body"));
}

#[test]
fn name_map_overrides_stored_names() {
    let section = populated_section();
    let mut name_map = IdToNameMap::new();
    name_map.insert(section.methods[0].id, "renamed_entry");

    let mut out = String::new();
    section.to_text_code(&name_map, &mut out, 0, true, false);
    assert!(out.contains(".method renamed_entry"));
    assert!(!out.contains(".method startup"));
}

#[test]
fn rendered_output_never_starts_with_blank_line() {
    // no blank line is emitted before the class block
    let mut section = populated_section();
    section.global_variables.clear();
    let out = render(&section, false, false);
    assert!(!out.starts_with('\n'));
}
