//! # Predicate - 조합 가능한 조건식
//!
//! 회원 검색 조건을 표현하는 작은 조건식 타입입니다.
//! 원자 조건(`Eq`, `Goe`, `Loe`, `Gt`, `Lt`)을 AND로만 조합하며,
//! [`Predicate::Always`]가 AND의 항등원입니다.
//!
//! 하나의 조건식은 두 가지로 해석됩니다.
//!
//! - [`Predicate::to_document`] - MongoDB `$match` / `filter` 문서
//! - [`Predicate::matches`] - 메모리 상의 [`Record`]에 대한 평가
//!
//! ```rust,ignore
//! let p = Predicate::goe("age", 35).and(Predicate::eq("team.name", "teamB"));
//! assert_eq!(
//!     p.to_document(),
//!     doc! { "$and": [ { "age": { "$gte": 35 } }, { "team.name": "teamB" } ] }
//! );
//! ```

use std::cmp::Ordering;
use mongodb::bson::{Bson, Document, doc};

/// 조건식의 비교 값
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i32),
}

impl FieldValue {
    /// 같은 종류의 값끼리만 순서를 비교합니다. 종류가 다르면 `None`.
    fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Str(a), FieldValue::Str(b)) => Some(a.cmp(b)),
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&FieldValue> for Bson {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Str(s) => Bson::String(s.clone()),
            FieldValue::Int(i) => Bson::Int32(*i),
        }
    }
}

/// 조건식으로 평가할 수 있는 레코드
///
/// `path`는 조인된 뷰 기준의 필드 경로(`username`, `age`, `team.name`)입니다.
/// 값이 없는 필드(팀이 없는 회원의 `team.name` 등)는 `None`을 반환하며,
/// 어떤 원자 조건도 `None`과는 일치하지 않습니다.
pub trait Record {
    fn field(&self, path: &str) -> Option<FieldValue>;
}

/// AND로만 조합되는 조건식
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Predicate {
    /// 모든 레코드와 일치 (WHERE 절 없음)
    #[default]
    Always,
    Eq(&'static str, FieldValue),
    Goe(&'static str, FieldValue),
    Loe(&'static str, FieldValue),
    Gt(&'static str, FieldValue),
    Lt(&'static str, FieldValue),
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn eq(path: &'static str, value: impl Into<FieldValue>) -> Self {
        Predicate::Eq(path, value.into())
    }

    pub fn goe(path: &'static str, value: impl Into<FieldValue>) -> Self {
        Predicate::Goe(path, value.into())
    }

    pub fn loe(path: &'static str, value: impl Into<FieldValue>) -> Self {
        Predicate::Loe(path, value.into())
    }

    pub fn gt(path: &'static str, value: impl Into<FieldValue>) -> Self {
        Predicate::Gt(path, value.into())
    }

    pub fn lt(path: &'static str, value: impl Into<FieldValue>) -> Self {
        Predicate::Lt(path, value.into())
    }

    /// 두 조건식을 AND로 결합합니다.
    ///
    /// `Always`는 항등원이라 결합 결과에 남지 않고, 중첩된 `And`는 평탄화됩니다.
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::Always, p) | (p, Predicate::Always) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(mut right)) => {
                right.insert(0, p);
                Predicate::And(right)
            }
            (left, right) => Predicate::And(vec![left, right]),
        }
    }

    /// 조건식 목록을 왼쪽부터 AND로 접습니다. 빈 목록이면 `Always`.
    pub fn all<I>(predicates: I) -> Predicate
    where
        I: IntoIterator<Item = Predicate>,
    {
        predicates.into_iter().fold(Predicate::Always, Predicate::and)
    }

    pub fn is_always(&self) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::And(parts) => parts.iter().all(Predicate::is_always),
            _ => false,
        }
    }

    /// 평탄화된 원자 조건 목록 (`Always`는 제외)
    pub fn atoms(&self) -> Vec<&Predicate> {
        let mut out = Vec::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms<'a>(&'a self, out: &mut Vec<&'a Predicate>) {
        match self {
            Predicate::Always => {}
            Predicate::And(parts) => parts.iter().for_each(|p| p.collect_atoms(out)),
            atom => out.push(atom),
        }
    }

    /// MongoDB 필터 문서로 변환합니다.
    ///
    /// - 원자 조건이 없으면 `{}` (모두 일치)
    /// - 하나면 `{ path: value }` 또는 `{ path: { "$op": value } }`
    /// - 둘 이상이면 `{ "$and": [ ... ] }`
    pub fn to_document(&self) -> Document {
        let atoms = self.atoms();
        match atoms.as_slice() {
            [] => Document::new(),
            [single] => atom_document(single),
            many => {
                let parts: Vec<Document> = many.iter().map(|atom| atom_document(atom)).collect();
                doc! { "$and": parts }
            }
        }
    }

    /// 레코드가 조건식을 만족하는지 메모리에서 평가합니다.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::And(parts) => parts.iter().all(|p| p.matches(record)),
            Predicate::Eq(path, value) => compare_field(record, path, value, |o| o == Ordering::Equal),
            Predicate::Goe(path, value) => compare_field(record, path, value, |o| o != Ordering::Less),
            Predicate::Loe(path, value) => compare_field(record, path, value, |o| o != Ordering::Greater),
            Predicate::Gt(path, value) => compare_field(record, path, value, |o| o == Ordering::Greater),
            Predicate::Lt(path, value) => compare_field(record, path, value, |o| o == Ordering::Less),
        }
    }
}

fn compare_field<R, F>(record: &R, path: &str, expected: &FieldValue, accept: F) -> bool
where
    R: Record + ?Sized,
    F: Fn(Ordering) -> bool,
{
    record
        .field(path)
        .and_then(|actual| actual.compare(expected))
        .is_some_and(accept)
}

fn atom_document(atom: &Predicate) -> Document {
    let (path, value) = match atom {
        Predicate::Eq(path, value) => (*path, Bson::from(value)),
        Predicate::Goe(path, value) => (*path, Bson::Document(doc! { "$gte": Bson::from(value) })),
        Predicate::Loe(path, value) => (*path, Bson::Document(doc! { "$lte": Bson::from(value) })),
        Predicate::Gt(path, value) => (*path, Bson::Document(doc! { "$gt": Bson::from(value) })),
        Predicate::Lt(path, value) => (*path, Bson::Document(doc! { "$lt": Bson::from(value) })),
        Predicate::Always | Predicate::And(_) => return Document::new(),
    };

    let mut document = Document::new();
    document.insert(path, value);
    document
}

/// 조건식을 누적하는 빌더
///
/// 필드마다 조건을 검사해 있을 때만 덧붙이는 흐름에 씁니다.
///
/// ```rust,ignore
/// let mut builder = PredicateBuilder::new();
/// builder.and_if_some(username_eq(cond)).and_if_some(age_goe(cond));
/// let predicate = builder.build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PredicateBuilder {
    predicate: Predicate,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(&mut self, predicate: Predicate) -> &mut Self {
        let current = std::mem::take(&mut self.predicate);
        self.predicate = current.and(predicate);
        self
    }

    pub fn and_if_some(&mut self, predicate: Option<Predicate>) -> &mut Self {
        if let Some(predicate) = predicate {
            self.and(predicate);
        }
        self
    }

    /// 조건이 하나라도 추가되었는지
    pub fn has_value(&self) -> bool {
        !self.predicate.is_always()
    }

    pub fn build(self) -> Predicate {
        self.predicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Row(HashMap<&'static str, FieldValue>);

    impl Record for Row {
        fn field(&self, path: &str) -> Option<FieldValue> {
            self.0.get(path).cloned()
        }
    }

    fn row(name: &str, age: i32) -> Row {
        Row(HashMap::from([("username", name.into()), ("age", age.into())]))
    }

    #[test]
    fn test_always_is_identity_of_and() {
        let atom = Predicate::eq("username", "member1");

        assert_eq!(Predicate::Always.and(atom.clone()), atom);
        assert_eq!(atom.clone().and(Predicate::Always), atom);
        assert_eq!(Predicate::Always.and(Predicate::Always), Predicate::Always);
    }

    #[test]
    fn test_and_flattens_nested_conjunctions() {
        let left = Predicate::goe("age", 10).and(Predicate::loe("age", 20));
        let right = Predicate::eq("username", "a").and(Predicate::eq("team.name", "teamA"));

        match left.and(right) {
            Predicate::And(parts) => assert_eq!(parts.len(), 4),
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn test_all_of_empty_is_always() {
        assert_eq!(Predicate::all(Vec::new()), Predicate::Always);
        assert!(Predicate::all(vec![Predicate::Always, Predicate::Always]).is_always());
    }

    #[test]
    fn test_to_document_shapes() {
        assert_eq!(Predicate::Always.to_document(), Document::new());
        assert_eq!(Predicate::eq("username", "member1").to_document(), doc! { "username": "member1" });
        assert_eq!(Predicate::goe("age", 35).to_document(), doc! { "age": { "$gte": 35 } });
        assert_eq!(Predicate::lt("age", 28).to_document(), doc! { "age": { "$lt": 28 } });

        let combined = Predicate::goe("age", 35).and(Predicate::loe("age", 40));
        assert_eq!(
            combined.to_document(),
            doc! { "$and": [ { "age": { "$gte": 35 } }, { "age": { "$lte": 40 } } ] }
        );
    }

    #[test]
    fn test_to_document_ignores_empty_and() {
        let predicate = Predicate::And(vec![Predicate::Always, Predicate::gt("age", 18)]);
        assert_eq!(predicate.to_document(), doc! { "age": { "$gt": 18 } });
        assert_eq!(Predicate::And(Vec::new()).to_document(), Document::new());
    }

    #[test]
    fn test_matches_comparisons() {
        let member = row("member1", 30);

        assert!(Predicate::eq("age", 30).matches(&member));
        assert!(Predicate::goe("age", 30).matches(&member));
        assert!(Predicate::loe("age", 30).matches(&member));
        assert!(!Predicate::gt("age", 30).matches(&member));
        assert!(!Predicate::lt("age", 30).matches(&member));
        assert!(Predicate::Always.matches(&member));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let member = row("member1", 30);

        assert!(!Predicate::eq("team.name", "teamA").matches(&member));
        assert!(!Predicate::goe("team.name", "").matches(&member));
    }

    #[test]
    fn test_mismatched_value_kind_never_matches() {
        let member = row("member1", 30);
        assert!(!Predicate::eq("age", "30").matches(&member));
    }

    #[test]
    fn test_builder_accumulates_only_present_predicates() {
        let mut builder = PredicateBuilder::new();
        assert!(!builder.has_value());

        builder
            .and_if_some(None)
            .and_if_some(Some(Predicate::goe("age", 20)))
            .and(Predicate::Always);
        assert!(builder.has_value());

        assert_eq!(builder.build(), Predicate::goe("age", 20));
    }
}
