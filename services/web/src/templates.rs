//! HTML templates, compiled into the binary

use tera::Tera;

const TEMPLATES: [(&str, &str); 8] = [
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("users.html", include_str!("../templates/users.html")),
    ("user_movies.html", include_str!("../templates/user_movies.html")),
    ("add_user.html", include_str!("../templates/add_user.html")),
    ("add_movie.html", include_str!("../templates/add_movie.html")),
    ("update_movie.html", include_str!("../templates/update_movie.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
];

pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(tera)
}
