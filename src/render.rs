//! Rendering of a [`DocModel`] to a standalone HTML page.

use minijinja::{context, Environment};

use crate::{generate::build_model, model::DocModel, schema::Definition, Error};

const TEMPLATE_NAME: &str = "doc.html";
const TEMPLATE: &str = include_str!("../templates/doc.html");

/// The stylesheet embedded in the page when no custom style is given.
pub const DEFAULT_STYLE: &str = include_str!("../templates/style.css");

/// The page title used when no title is given.
pub const DEFAULT_TITLE: &str = "Protocol Documentation";

/// Options controlling the rendered page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// CSS embedded in the page instead of [`DEFAULT_STYLE`].
    pub custom_style: Option<String>,
    /// The page title, defaulting to [`DEFAULT_TITLE`].
    pub title: Option<String>,
}

impl RenderOptions {
    /// Sets a custom stylesheet.
    pub fn custom_style(mut self, style: impl Into<String>) -> Self {
        self.custom_style = Some(style.into());
        self
    }

    /// Sets the page title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn style(&self) -> &str {
        self.custom_style.as_deref().unwrap_or(DEFAULT_STYLE)
    }
}

/// Renders a documentation model as an HTML page.
///
/// Names are escaped, while descriptions are inserted as-is since they are already [`Markup`](crate::Markup).
pub fn render_html(model: &DocModel, options: &RenderOptions) -> Result<String, Error> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(Error::render)?;

    let template = env.get_template(TEMPLATE_NAME).map_err(Error::render)?;
    template
        .render(context! {
            title => options.title.as_deref().unwrap_or(DEFAULT_TITLE),
            style => options.style(),
            services => &model.services,
            messages => &model.messages,
            enums => &model.enums,
        })
        .map_err(Error::render)
}

/// Builds a documentation model from `definitions` and renders it as an HTML page.
///
/// # Examples
///
/// ```
/// # use protodoc::{generate_doc, RenderOptions, schema::{Definition, Package, Service, Rpc}};
/// let definition = Definition::new("greeter.proto")
///     .with_element(Package::new("greet"))
///     .with_element(Service::new("Greeter").with_rpc(Rpc::new("Hello", "Request", "Reply")));
///
/// let html = generate_doc([&definition], &RenderOptions::default())?;
/// assert!(html.contains("greet.Greeter"));
/// assert!(html.contains("greet.Request"));
/// # Ok::<(), protodoc::Error>(())
/// ```
pub fn generate_doc<'a>(
    definitions: impl IntoIterator<Item = &'a Definition>,
    options: &RenderOptions,
) -> Result<String, Error> {
    let model = build_model(definitions)?;
    tracing::debug!(
        services = model.services.len(),
        messages = model.messages.len(),
        enums = model.enums.len(),
        "rendering documentation"
    );
    render_html(&model, options)
}
