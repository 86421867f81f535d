//! Server-rendered admin pages: view models plus the minijinja templates that render them.

pub mod create;
pub mod edit;
pub mod form;
pub mod list;

pub use form::FormView;
pub use list::ListView;

use minijinja::Environment;
use serde::Serialize;

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("templates/layout.html"))?;
        env.add_template("list.html", include_str!("templates/list.html"))?;
        env.add_template("form.html", include_str!("templates/form.html"))?;
        Ok(Views { env })
    }

    pub fn list(&self, view: &ListView) -> Result<String, minijinja::Error> {
        self.render("list.html", view)
    }

    pub fn form(&self, view: &FormView) -> Result<String, minijinja::Error> {
        self.render("form.html", view)
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}
