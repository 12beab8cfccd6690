//! JS 对象字面量字段提取。

use crate::pattern::Pattern;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

static OBJECT_LITERAL: Pattern = Pattern::new(r"\{([^}]*)\}");

/// 把 `k:v,k:'v',...` 片段拆成键值表。
///
/// 优先按引号感知的方式拆分（引号内的逗号不作为分隔符）；引号不闭合时
/// 退回到逐逗号、首冒号的朴素拆分。值两侧的单/双引号会被去掉。
pub fn parse_js_object(fragment: &str) -> BTreeMap<String, String> {
    match split_pairs_quoted(fragment) {
        Some(pairs) => pairs
            .iter()
            .filter_map(|pair| {
                let (key, value) = pair.split_once(':')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((unquote(key).to_string(), unquote(value.trim()).to_string()))
            })
            .collect(),
        None => {
            debug!(fragment, "unbalanced quotes, falling back to plain split");
            split_pairs_plain(fragment)
        }
    }
}

/// 数组片段中的每个 `{...}` 对象体（不含花括号）。
pub fn split_objects(array_body: &str) -> Vec<&str> {
    let Some(regex) = OBJECT_LITERAL.regex() else {
        return Vec::new();
    };
    regex
        .captures_iter(array_body)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// 取字段并解析为数值，缺失或非法时为 `None`。
pub(crate) fn field<T: FromStr>(object: &BTreeMap<String, String>, key: &str) -> Option<T> {
    object.get(key)?.trim().parse().ok()
}

/// 引号不闭合时返回 `None`。
fn split_pairs_quoted(fragment: &str) -> Option<Vec<String>> {
    let mut pairs = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in fragment.chars() {
        match ch {
            '"' | '\'' => {
                match quote {
                    None => quote = Some(ch),
                    Some(open) if open == ch => quote = None,
                    Some(_) => {}
                }
                current.push(ch);
            }
            ',' if quote.is_none() => {
                if !current.trim().is_empty() {
                    pairs.push(current.trim().to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if quote.is_some() {
        return None;
    }
    if !current.trim().is_empty() {
        pairs.push(current.trim().to_string());
    }
    Some(pairs)
}

fn split_pairs_plain(fragment: &str) -> BTreeMap<String, String> {
    fragment
        .split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once(':')?;
            Some((
                unquote(key.trim()).to_string(),
                unquote(value.trim()).to_string(),
            ))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    let value = strip_pair(value, '"');
    strip_pair(value, '\'')
}

fn strip_pair(value: &str, quote: char) -> &str {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_commas_do_not_split() {
        let map = parse_js_object("name:'Fan, north',port:161,community:\"public\"");
        assert_eq!(map.get("name").map(String::as_str), Some("Fan, north"));
        assert_eq!(map.get("port").map(String::as_str), Some("161"));
        assert_eq!(map.get("community").map(String::as_str), Some("public"));
    }

    #[test]
    fn values_keep_inner_colons() {
        let map = parse_js_object("mac:'00:A2:5A:01:02:03', ip : '10.0.0.1'");
        assert_eq!(map.get("mac").map(String::as_str), Some("00:A2:5A:01:02:03"));
        assert_eq!(map.get("ip").map(String::as_str), Some("10.0.0.1"));
    }

    #[test]
    fn unbalanced_quotes_fall_back_to_plain_split() {
        let map = parse_js_object("name:'broken,port:161");
        assert_eq!(map.get("port").map(String::as_str), Some("161"));
        assert_eq!(map.get("name").map(String::as_str), Some("'broken"));
    }

    #[test]
    fn split_objects_finds_each_literal() {
        let objects = split_objects("{a:1,b:2}, {a:3}\n,{ }");
        assert_eq!(objects, vec!["a:1,b:2", "a:3", " "]);
    }
}
