//! Test fixtures - reusable JSON inputs.

/// Permission records: system > (user > add, delete), (role > view)
pub const PERMISSIONS: &str = r#"[
  {"id": 1, "name": "system"},
  {"id": 2, "parentId": 1, "name": "user"},
  {"id": 3, "parentId": 2, "name": "user:add"},
  {"id": 4, "parentId": 2, "name": "user:delete"},
  {"id": 5, "parentId": 1, "name": "role"},
  {"id": 6, "parentId": 5, "name": "role:view"}
]"#;

/// Departments keyed by custom field names
pub const DEPARTMENTS: &str = r#"[
  {"deptId": "hq", "deptName": "Head office"},
  {"deptId": "rd", "parentDeptId": "hq", "deptName": "R&D"},
  {"deptId": "qa", "parentDeptId": "rd", "deptName": "QA"}
]"#;

/// Flat backend menus, one routed through `extraData`
pub const MENUS: &str = r#"[
  {"menuId": 1, "menuName": "System", "icon": "setting"},
  {"menuId": 2, "parentId": 1, "menuName": "Users", "formRouterName": "formSysUser", "menuType": 1},
  {"menuId": 3, "parentId": 1, "menuName": "Report", "extraData": "{\"reportPageId\": 7}"}
]"#;
