//! 请求体结构校验
//!
//! 先逐字段检查是否缺失、JSON 类型是否正确，再反序列化为强类型记录并运行
//! `validator` 约束。出错字段会被替换为同类型占位值，其余字段的约束仍会被检查，
//! 因此一次响应可以列出所有不合法的字段。

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use super::error::{FieldIssue, ValidationError};

/// 字段的 JSON 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Bool,
    StringList,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            FieldKind::String => "Input should be a valid string",
            FieldKind::Integer => "Input should be a valid integer",
            FieldKind::Number => "Input should be a valid number",
            FieldKind::Bool => "Input should be a valid boolean",
            FieldKind::StringList => "Input should be a valid list of strings",
        }
    }

    fn placeholder(self) -> Value {
        match self {
            FieldKind::String => Value::String(String::new()),
            FieldKind::Integer | FieldKind::Number => Value::from(0),
            FieldKind::Bool => Value::Bool(false),
            FieldKind::StringList => Value::Array(Vec::new()),
        }
    }
}

/// 字段是否必须出现、是否允许 `null`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// 必须出现且不能为 `null`
    Required,
    /// 可省略（使用默认值），但不能为 `null`
    Defaulted,
    /// 可省略或为 `null`
    Nullable,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, presence: Presence::Required }
    }

    pub const fn defaulted(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, presence: Presence::Defaulted }
    }

    pub const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, presence: Presence::Nullable }
    }

    fn issue(&self, msg: &str, kind: &str) -> FieldIssue {
        FieldIssue {
            loc: vec!["body".to_string(), self.name.to_string()],
            msg: msg.to_string(),
            kind: kind.to_string(),
        }
    }

    fn check(&self, value: Option<&Value>) -> Option<FieldIssue> {
        match value {
            None if self.presence == Presence::Required => Some(self.issue("Field required", "missing")),
            None => None,
            Some(Value::Null) if self.presence == Presence::Nullable => None,
            Some(value) if self.kind.matches(value) => None,
            Some(_) => Some(self.issue(self.kind.expected(), "type_error")),
        }
    }

    fn placeholder(&self) -> Value {
        match self.presence {
            Presence::Nullable => Value::Null,
            _ => self.kind.placeholder(),
        }
    }
}

/// 请求体的字段表
pub trait Schema {
    const FIELDS: &'static [FieldSpec];
}

/// 将任意 JSON 值解析为经过校验的记录，失败时列出所有出错字段
pub fn parse_payload<T>(body: Value) -> Result<T, ValidationError>
where
    T: Schema + DeserializeOwned + Validate,
{
    let Value::Object(mut fields) = body else {
        return Err(ValidationError::single(
            &["body"],
            "Input should be a valid dictionary",
            "type_error",
        ));
    };

    let mut issues = structural_issues(&mut fields, T::FIELDS);

    match serde_json::from_value::<T>(Value::Object(fields)) {
        Ok(record) => {
            if let Err(errors) = record.validate() {
                let flagged: Vec<Vec<String>> = issues.iter().map(|i| i.loc.clone()).collect();
                issues.extend(
                    ValidationError::from_errors("body", &errors)
                        .issues
                        .into_iter()
                        .filter(|issue| !flagged.contains(&issue.loc)),
                );
            }
            if issues.is_empty() {
                return Ok(record);
            }
        }
        // 字段表覆盖不到的情况（例如整数溢出）
        Err(e) if issues.is_empty() => {
            issues.push(FieldIssue {
                loc: vec!["body".to_string()],
                msg: e.to_string(),
                kind: "value_error".to_string(),
            });
        }
        Err(_) => {}
    }

    issues.sort_by(|a, b| a.loc.cmp(&b.loc));
    Err(ValidationError { issues })
}

/// 记录缺失或类型错误的字段，并用占位值替换它们
fn structural_issues(fields: &mut Map<String, Value>, specs: &[FieldSpec]) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    for spec in specs {
        if let Some(issue) = spec.check(fields.get(spec.name)) {
            fields.insert(spec.name.to_string(), spec.placeholder());
            issues.push(issue);
        }
    }
    issues
}
