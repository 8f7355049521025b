use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{Category, TransactionType};

/// What the category picker cycles through: the fixed set, then `Other`.
static CHOICES: [Category; 6] = [
    Category::Groceries,
    Category::Utilities,
    Category::Rent,
    Category::Entertainment,
    Category::Transport,
    Category::Other,
];

/// Category picker with a free-text label behind `Other`.
///
/// Picking `Other` yields the bare `Other` value until a label is entered;
/// a label makes it `Other: <label>` exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CategorySelector {
    value: Category,
}

impl CategorySelector {
    pub(crate) fn choices() -> &'static [Category] {
        &CHOICES
    }

    pub(crate) fn value(&self) -> &Category {
        &self.value
    }

    /// Position of the current value in `choices()`. `None` for values the
    /// picker can't offer, like an unlisted store category.
    pub(crate) fn choice_index(&self) -> Option<usize> {
        let choices = Self::choices();
        if self.value.is_other() {
            return Some(choices.len() - 1);
        }
        choices.iter().position(|c| *c == self.value)
    }

    pub(crate) fn next(&mut self) {
        let idx = self
            .choice_index()
            .map_or(0, |i| (i + 1) % CHOICES.len());
        self.value = CHOICES[idx].clone();
    }

    pub(crate) fn prev(&mut self) {
        let idx = match self.choice_index() {
            Some(0) | None => CHOICES.len() - 1,
            Some(i) => i - 1,
        };
        self.value = CHOICES[idx].clone();
    }

    /// Whether the label field is shown.
    pub(crate) fn label_visible(&self) -> bool {
        self.value.is_other()
    }

    /// Apply typed label text. Ignored unless `Other` is picked; empty text
    /// leaves the bare `Other`.
    pub(crate) fn type_label(&mut self, text: &str) -> bool {
        if !self.label_visible() {
            return false;
        }
        self.value = if text.is_empty() {
            Category::Other
        } else {
            Category::Custom(text.to_string())
        };
        true
    }

    /// Drop the typed label and go back to bare `Other`.
    pub(crate) fn change(&mut self) {
        if let Category::Custom(_) = self.value {
            self.value = Category::Other;
        }
    }

    /// Load an existing category, e.g. when editing a budget.
    pub(crate) fn set(&mut self, category: &Category) {
        self.value = category.clone();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Type,
    Amount,
    Category,
    Label,
    Description,
    Submit,
}

impl FormField {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Label => "Custom label",
            Self::Description => "Description",
            Self::Submit => "Submit",
        }
    }

    /// Fields edited as free text (Enter opens the editor).
    pub(crate) fn is_text(&self) -> bool {
        matches!(self, Self::Amount | Self::Label | Self::Description)
    }
}

/// Parse a user-entered amount. Blank or non-positive input is `None`.
pub(crate) fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim().trim_start_matches('$').replace(',', "");
    Decimal::from_str(&trimmed)
        .ok()
        .filter(|a| *a > Decimal::ZERO)
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionForm {
    pub(crate) kind: TransactionType,
    pub(crate) amount: String,
    pub(crate) category: CategorySelector,
    pub(crate) description: String,
    pub(crate) field_index: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct BudgetForm {
    pub(crate) category: CategorySelector,
    pub(crate) amount: String,
    pub(crate) field_index: usize,
}

/// Shared behaviour of the two entry forms.
pub(crate) trait EntryForm {
    fn fields(&self) -> Vec<FormField>;
    fn field_index(&self) -> usize;
    fn set_field_index(&mut self, index: usize);
    fn category(&self) -> &CategorySelector;
    fn category_mut(&mut self) -> &mut CategorySelector;
    fn text(&self, field: FormField) -> String;
    fn set_text(&mut self, field: FormField, value: String);
    /// Cycle a choice field; text fields ignore this.
    fn adjust(&mut self, field: FormField, forward: bool);

    fn selected_field(&self) -> FormField {
        let fields = self.fields();
        fields
            .get(self.field_index())
            .or_else(|| fields.last())
            .copied()
            .unwrap_or(FormField::Submit)
    }

    fn move_down(&mut self) {
        let len = self.fields().len();
        if self.field_index() + 1 < len {
            self.set_field_index(self.field_index() + 1);
        }
    }

    fn move_up(&mut self) {
        self.set_field_index(self.field_index().saturating_sub(1));
    }

    /// Keep the cursor inside the field list after the label row appears
    /// or disappears.
    fn clamp_cursor(&mut self) {
        let len = self.fields().len();
        if self.field_index() >= len {
            self.set_field_index(len.saturating_sub(1));
        }
    }
}

fn adjust_category(category: &mut CategorySelector, forward: bool) {
    if forward {
        category.next();
    } else {
        category.prev();
    }
}

impl EntryForm for TransactionForm {
    fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Type, FormField::Amount, FormField::Category];
        if self.category.label_visible() {
            fields.push(FormField::Label);
        }
        fields.push(FormField::Description);
        fields.push(FormField::Submit);
        fields
    }

    fn field_index(&self) -> usize {
        self.field_index
    }

    fn set_field_index(&mut self, index: usize) {
        self.field_index = index;
    }

    fn category(&self) -> &CategorySelector {
        &self.category
    }

    fn category_mut(&mut self) -> &mut CategorySelector {
        &mut self.category
    }

    fn text(&self, field: FormField) -> String {
        match field {
            FormField::Type => self.kind.to_string(),
            FormField::Amount => self.amount.clone(),
            FormField::Category => self.category.value().to_string(),
            FormField::Label => self.category.value().label().unwrap_or_default().to_string(),
            FormField::Description => self.description.clone(),
            FormField::Submit => format!("Add {}", self.kind),
        }
    }

    fn set_text(&mut self, field: FormField, value: String) {
        match field {
            FormField::Amount => self.amount = value,
            FormField::Label => {
                self.category.type_label(&value);
            }
            FormField::Description => self.description = value,
            _ => {}
        }
    }

    fn adjust(&mut self, field: FormField, forward: bool) {
        match field {
            FormField::Type => self.kind = self.kind.toggle(),
            FormField::Category => adjust_category(&mut self.category, forward),
            _ => {}
        }
    }
}

impl TransactionForm {
    /// Clear the per-entry fields. Type and category stay as they were.
    pub(crate) fn reset_entry(&mut self) {
        self.amount.clear();
        self.description.clear();
    }
}

impl EntryForm for BudgetForm {
    fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Category];
        if self.category.label_visible() {
            fields.push(FormField::Label);
        }
        fields.push(FormField::Amount);
        fields.push(FormField::Submit);
        fields
    }

    fn field_index(&self) -> usize {
        self.field_index
    }

    fn set_field_index(&mut self, index: usize) {
        self.field_index = index;
    }

    fn category(&self) -> &CategorySelector {
        &self.category
    }

    fn category_mut(&mut self) -> &mut CategorySelector {
        &mut self.category
    }

    fn text(&self, field: FormField) -> String {
        match field {
            FormField::Amount => self.amount.clone(),
            FormField::Category => self.category.value().to_string(),
            FormField::Label => self.category.value().label().unwrap_or_default().to_string(),
            FormField::Submit => "Set".to_string(),
            FormField::Type | FormField::Description => String::new(),
        }
    }

    fn set_text(&mut self, field: FormField, value: String) {
        match field {
            FormField::Amount => self.amount = value,
            FormField::Label => {
                self.category.type_label(&value);
            }
            _ => {}
        }
    }

    fn adjust(&mut self, field: FormField, forward: bool) {
        if field == FormField::Category {
            adjust_category(&mut self.category, forward);
        }
    }
}
