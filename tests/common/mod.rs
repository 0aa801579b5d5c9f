//! Shared builders for integration tests

use eplfile::entities::variable::VariableBase;
use eplfile::entities::{
    ClassInfo, DllDeclareInfo, GlobalVariableInfo, LibraryRefInfo, MethodInfo, StructInfo,
};
use eplfile::entities::{DllParameterInfo, MethodParameterInfo, StructMemberInfo};
use eplfile::types::id::{
    TAG_CLASS, TAG_DLL_DECLARE, TAG_GLOBAL_VARIABLE, TAG_METHOD, TAG_METHOD_PARAMETER, TAG_STRUCT,
    TAG_STRUCT_MEMBER,
};
use eplfile::{CodeSection, EplId};

/// A section exercising every entity list plus the optional blocks.
pub fn populated_section() -> CodeSection {
    let mut section = CodeSection::new();

    let class_id = section.alloc_id(TAG_CLASS).unwrap();
    let method_id = section.alloc_id(TAG_METHOD).unwrap();
    let global_id = section.alloc_id(TAG_GLOBAL_VARIABLE).unwrap();
    let struct_id = section.alloc_id(TAG_STRUCT).unwrap();
    let dll_id = section.alloc_id(TAG_DLL_DECLARE).unwrap();
    let param_id = section.alloc_id(TAG_METHOD_PARAMETER).unwrap();
    let member_id = section.alloc_id(TAG_STRUCT_MEMBER).unwrap();

    section.unknown_before_library_1 = vec![0x01, 0x02, 0x03];
    section.unknown_before_library_2 = vec![0xAA; 7];
    section.unknown_before_library_3 = vec![0x55, 0x44];
    section.libraries = vec![LibraryRefInfo {
        file_name: "krnln".to_string(),
        guid: "d09f2340818511d396f6aaf844c7e325".to_string(),
        major_version: 5,
        minor_version: 7,
        name: "system core library".to_string(),
    }];
    section.set_pre_icon_block(Some([0x10; 16]));
    section.icon_data = vec![0x42; 32];
    section.debug_command_parameters = "--trace".to_string();
    section.main_method = method_id;

    section.methods.push(MethodInfo {
        id: method_id,
        class_id,
        flags: 1,
        return_type: 3,
        name: "startup".to_string(),
        comment: "entry point".to_string(),
        parameters: vec![MethodParameterInfo::from(VariableBase {
            id: param_id,
            data_type: 9,
            name: "args".to_string(),
            ..Default::default()
        })],
        local_variables: Vec::new(),
        code_data: vec![0xDE, 0xAD],
    });
    section.classes.push(ClassInfo {
        id: class_id,
        base_class: EplId::NULL,
        flags: 1,
        name: "main_module".to_string(),
        comment: String::new(),
        method_ids: vec![method_id],
        variables: Vec::new(),
    });
    section.global_variables.push(GlobalVariableInfo::from(VariableBase {
        id: global_id,
        data_type: 3,
        flags: 1,
        bounds: vec![10],
        name: "counters".to_string(),
        comment: "per-window counters".to_string(),
    }));
    section.structs.push(StructInfo {
        id: struct_id,
        flags: 0,
        name: "point".to_string(),
        comment: String::new(),
        members: vec![StructMemberInfo::from(VariableBase {
            id: member_id,
            data_type: 3,
            name: "x".to_string(),
            ..Default::default()
        })],
    });
    section.dll_declares.push(DllDeclareInfo {
        id: dll_id,
        flags: 1,
        return_type: 3,
        name: "message_box".to_string(),
        comment: String::new(),
        library_file: "user32.dll".to_string(),
        entry_point: "MessageBoxA".to_string(),
        parameters: vec![DllParameterInfo::from(VariableBase {
            id: EplId::from_raw(TAG_METHOD_PARAMETER | 0x20),
            data_type: 9,
            name: "text".to_string(),
            ..Default::default()
        })],
    });

    section
}
