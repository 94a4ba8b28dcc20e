//! Stylesheet templates, one per supported CSS engine

/// Plain CSS stylesheet
pub const STYLE_CSS: &str = r#"body {
  padding: 50px;
  font: 14px "Lucida Grande", Helvetica, Arial, sans-serif;
}

a {
  color: #00B7FF;
}
"#;

/// Less stylesheet
pub const STYLE_LESS: &str = r#"body {
  padding: 50px;
  font: 14px "Lucida Grande", Helvetica, Arial, sans-serif;
}

a {
  color: #00B7FF;
}
"#;

/// Stylus stylesheet
pub const STYLE_STYL: &str = r#"body
  padding: 50px
  font: 14px "Lucida Grande", Helvetica, Arial, sans-serif

a
  color: #00B7FF
"#;

/// SCSS stylesheet (compass)
pub const STYLE_SCSS: &str = r#"body {
  padding: 50px;
  font: 14px "Lucida Grande", Helvetica, Arial, sans-serif;
}

a {
  color: #00B7FF;
}
"#;

/// Indented Sass stylesheet
pub const STYLE_SASS: &str = r#"body
  padding: 50px
  font: 14px "Lucida Grande", Helvetica, Arial, sans-serif

a
  color: #00B7FF
"#;
