use std::cmp::Ordering;

use uuid::Uuid;

use crate::{
    api::{ApiError, SalaryComponent, SalaryComponentKind, SalaryStructure, SalaryStructureInput},
    pagination::FilterSet,
    utils::form::{parse_amount, required},
};
use leptos::*;

pub fn structure_matches(_structure: &SalaryStructure, _filters: &FilterSet) -> bool {
    true
}

pub fn by_name(a: &SalaryStructure, b: &SalaryStructure) -> Ordering {
    a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
}

/// `¥300,000` for yen, `1,234.50 USD` otherwise.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let (whole, cents) = if currency == "JPY" {
        (amount.round() as u64, None)
    } else {
        let scaled = (amount * 100.0).round() as u64;
        (scaled / 100, Some(scaled % 100))
    };
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    match cents {
        None => format!("{}¥{}", sign, grouped),
        Some(cents) => format!("{}{}.{:02} {}", sign, grouped, cents, currency),
    }
}

pub fn kind_label(kind: SalaryComponentKind) -> &'static str {
    match kind {
        SalaryComponentKind::Allowance => "手当",
        SalaryComponentKind::Deduction => "控除",
    }
}

/// One editable allowance/deduction line. `key` stays stable while rows are
/// added and removed.
#[derive(Clone, Copy)]
pub struct ComponentRow {
    pub key: Uuid,
    pub name: RwSignal<String>,
    pub kind: RwSignal<SalaryComponentKind>,
    pub amount: RwSignal<String>,
}

impl ComponentRow {
    fn new(name: String, kind: SalaryComponentKind, amount: String) -> Self {
        Self {
            key: Uuid::new_v4(),
            name: create_rw_signal(name),
            kind: create_rw_signal(kind),
            amount: create_rw_signal(amount),
        }
    }

    fn to_component(self, line: usize) -> Result<SalaryComponent, ApiError> {
        let name = required(
            self.name.get(),
            &format!("{}行目の項目名を入力してください。", line),
        )?;
        let amount = parse_amount(
            &self.amount.get(),
            &format!("{}行目の金額は0以上の数値で入力してください。", line),
        )?;
        Ok(SalaryComponent {
            name,
            kind: self.kind.get(),
            amount,
        })
    }
}

#[derive(Clone, Copy)]
pub struct SalaryFormState {
    pub name: RwSignal<String>,
    pub currency: RwSignal<String>,
    pub base_amount: RwSignal<String>,
    pub components: RwSignal<Vec<ComponentRow>>,
}

impl Default for SalaryFormState {
    fn default() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            currency: create_rw_signal("JPY".to_string()),
            base_amount: create_rw_signal(String::new()),
            components: create_rw_signal(Vec::new()),
        }
    }
}

impl SalaryFormState {
    pub fn reset(&self) {
        self.name.set(String::new());
        self.currency.set("JPY".into());
        self.base_amount.set(String::new());
        self.components.set(Vec::new());
    }

    pub fn load(&self, structure: &SalaryStructure) {
        self.name.set(structure.name.clone());
        self.currency.set(structure.currency.clone());
        self.base_amount.set(structure.base_amount.to_string());
        self.components.set(
            structure
                .components
                .iter()
                .map(|c| ComponentRow::new(c.name.clone(), c.kind, c.amount.to_string()))
                .collect(),
        );
    }

    pub fn add_component(&self, kind: SalaryComponentKind) {
        let row = ComponentRow::new(String::new(), kind, String::new());
        self.components.update(|rows| rows.push(row));
    }

    pub fn remove_component(&self, key: Uuid) {
        self.components.update(|rows| rows.retain(|row| row.key != key));
    }

    /// Net amount of the draft; unparsable amounts count as zero.
    pub fn preview_net(&self) -> f64 {
        let base = self.base_amount.with(|v| v.trim().replace(',', "").parse().unwrap_or(0.0));
        self.components.with(|rows| {
            rows.iter().fold(base, |acc, row| {
                let amount: f64 = row
                    .amount
                    .with(|v| v.trim().replace(',', "").parse().unwrap_or(0.0));
                match row.kind.get() {
                    SalaryComponentKind::Allowance => acc + amount,
                    SalaryComponentKind::Deduction => acc - amount,
                }
            })
        })
    }

    pub fn to_payload(&self) -> Result<SalaryStructureInput, ApiError> {
        let name = required(self.name.get(), "給与体系名を入力してください。")?;
        let currency = required(self.currency.get(), "通貨を入力してください。")?.to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ApiError::validation("通貨は3文字のコード（例: JPY）で入力してください。"));
        }
        let base_amount = parse_amount(
            &self.base_amount.get(),
            "基本給は0以上の数値で入力してください。",
        )?;
        let components = self
            .components
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.to_component(i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SalaryStructureInput {
            name,
            currency,
            base_amount,
            components,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_structure(id: &str, name: &str) -> SalaryStructure {
    SalaryStructure {
        id: id.into(),
        name: name.into(),
        currency: "JPY".into(),
        base_amount: 300_000.0,
        components: vec![
            SalaryComponent {
                name: "通勤手当".into(),
                kind: SalaryComponentKind::Allowance,
                amount: 15_000.0,
            },
            SalaryComponent {
                name: "社会保険".into(),
                kind: SalaryComponentKind::Deduction,
                amount: 45_000.0,
            },
        ],
        assigned_count: 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn formats_amounts_by_currency() {
        assert_eq!(format_amount(300_000.0, "JPY"), "¥300,000");
        assert_eq!(format_amount(999.0, "JPY"), "¥999");
        assert_eq!(format_amount(1234.5, "USD"), "1,234.50 USD");
        assert_eq!(format_amount(-1500.0, "JPY"), "-¥1,500");
    }

    #[test]
    fn dynamic_rows_keep_keys_and_compute_net() {
        with_runtime(|| {
            let state = SalaryFormState::default();
            state.load(&sample_structure("s1", "正社員"));
            assert_eq!(state.preview_net(), 270_000.0);

            state.add_component(SalaryComponentKind::Allowance);
            let rows = state.components.get_untracked();
            assert_eq!(rows.len(), 3);
            let first_key = rows[0].key;
            state.remove_component(rows[1].key);
            let rows = state.components.get_untracked();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].key, first_key);
        });
    }

    #[test]
    fn payload_validates_each_row() {
        with_runtime(|| {
            let state = SalaryFormState::default();
            state.name.set("契約社員".into());
            state.base_amount.set("250,000".into());
            state.add_component(SalaryComponentKind::Deduction);
            let err = state.to_payload().unwrap_err();
            assert!(err.error.starts_with("1行目"));

            let row = state.components.get_untracked()[0];
            row.name.set("住民税".into());
            row.amount.set("12000".into());
            let payload = state.to_payload().unwrap();
            assert_eq!(payload.base_amount, 250_000.0);
            assert_eq!(payload.components[0].kind, SalaryComponentKind::Deduction);
            assert_eq!(payload.currency, "JPY");
        });
    }

    #[test]
    fn invalid_currency_is_rejected() {
        with_runtime(|| {
            let state = SalaryFormState::default();
            state.name.set("x".into());
            state.base_amount.set("1".into());
            state.currency.set("yen!".into());
            assert!(state.to_payload().unwrap_err().error.contains("通貨"));
        });
    }
}
