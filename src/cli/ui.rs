use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Label,
    Value,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
    };
    styled.to_string()
}
