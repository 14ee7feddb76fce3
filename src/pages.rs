//! Server-rendered single page with the "Inventory", "New Product" and
//! "Sales" sections.

use std::fmt::Write as _;

use crate::{
    dto::{
        catalog::{CatalogView, Tile},
        intake::{ACCEPTED_IMAGE_EXTENSIONS, ImageSource, IntakeForm},
    },
    error::AppError,
    models::Category,
    response::{Notice, NoticeLevel},
    routes::{catalog::CATALOG_CHANGED_EVENT, sales::SALES_PLACEHOLDER},
};

pub const PAGE_TITLE: &str = "Shop Inventory";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Inventory,
    NewProduct,
    Sales,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Inventory, Section::NewProduct, Section::Sales];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Inventory => "inventory",
            Section::NewProduct => "new-product",
            Section::Sales => "sales",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Inventory => "Inventory",
            Section::NewProduct => "New Product",
            Section::Sales => "Sales",
        }
    }
}

pub struct Page<'a> {
    pub active: Section,
    /// `Err` is shown in place of the grid.
    pub catalog: &'a Result<CatalogView, AppError>,
    pub form: &'a IntakeForm,
    pub notices: &'a [Notice],
}

pub fn render_page(page: &Page<'_>) -> String {
    let mut nav = String::new();
    for section in Section::ALL {
        let class = if section == page.active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            "<a href=\"#{id}\"{class}>{title}</a>",
            id = section.id(),
            title = section.title()
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<style>{STYLE}</style>
</head>
<body data-active="{active}">
<h1>{PAGE_TITLE}</h1>
<nav>{nav}</nav>
{inventory}
{new_product}
{sales}
<script>{script}</script>
</body>
</html>
"#,
        active = page.active.id(),
        inventory = section(Section::Inventory, page.active, &render_inventory(page)),
        new_product = section(
            Section::NewProduct,
            page.active,
            &render_new_product(page.form, page.notices)
        ),
        sales = section(
            Section::Sales,
            page.active,
            &notice_html(&Notice::info(SALES_PLACEHOLDER))
        ),
        script = live_reload_script(),
    )
}

fn section(section: Section, active: Section, body: &str) -> String {
    let class = if section == active { " class=\"active\"" } else { "" };
    format!(
        "<section id=\"{id}\"{class}>\n<h2>{title}</h2>\n{body}\n</section>",
        id = section.id(),
        title = section.title()
    )
}

fn render_inventory(page: &Page<'_>) -> String {
    let body = match page.catalog {
        Err(err) => notice_html(&Notice::error(err.to_string())),
        Ok(CatalogView::Empty { message }) => notice_html(&Notice::info(message.as_str())),
        Ok(CatalogView::Grid { query, columns, note, .. }) => {
            let mut html = search_form(query);
            if let Some(note) = note {
                html.push_str(&notice_html(&Notice::info(note.as_str())));
            }
            html.push_str("<div class=\"grid\">");
            for column in columns {
                html.push_str("<div class=\"column\">");
                for tile in column {
                    html.push_str(&tile_html(tile));
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
            html
        }
    };
    format!("<div id=\"inventory-content\">{body}</div>")
}

fn search_form(query: &str) -> String {
    format!(
        "<form id=\"search\" method=\"get\" action=\"/\"><input type=\"search\" name=\"q\" \
         placeholder=\"Search product...\" value=\"{}\"><button type=\"submit\">Search</button></form>",
        escape(query)
    )
}

pub fn tile_html(tile: &Tile) -> String {
    let image = match &tile.image_url {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape(url),
            escape(&tile.name)
        ),
        None => "<div class=\"placeholder\">No image</div>".to_string(),
    };
    format!(
        "<article class=\"tile\">{image}<h3>{name}</h3>\
         <p><strong>Category:</strong> {category}</p>\
         <p><strong>Stock:</strong> {stock}</p>\
         <p class=\"price\"><small>Price</small><br><span>{price}</span></p></article>",
        name = escape(&tile.name),
        category = escape(&tile.category),
        stock = escape(&tile.stock_label),
        price = escape(&tile.price_label),
    )
}

fn render_new_product(form: &IntakeForm, notices: &[Notice]) -> String {
    let mut html = String::new();
    for notice in notices {
        html.push_str(&notice_html(notice));
    }

    let mut options = String::new();
    for category in Category::ALL {
        let selected = if category.as_str().eq_ignore_ascii_case(form.category.trim()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(options, "<option{selected}>{category}</option>");
    }

    let (upload_checked, paste_checked, pasted) = match &form.image {
        ImageSource::Upload(_) => (" checked", "", ""),
        ImageSource::PasteUrl(url) => ("", " checked", url.as_str()),
    };
    let accept = ACCEPTED_IMAGE_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    let _ = write!(
        html,
        r#"<form id="product-form" method="post" action="/products/new" enctype="multipart/form-data">
<label>Product name <input type="text" name="name" value="{name}" required></label>
<label>Category <select name="category">{options}</select></label>
<label>Sale price (S/) <input type="number" name="price" min="0" step="0.5" value="{price}"></label>
<label>Initial stock <input type="number" name="stock" min="1" step="1" value="{stock}"></label>
<fieldset><legend>Product image</legend>
<label><input type="radio" name="image_mode" value="upload"{upload_checked}> Upload file</label>
<label><input type="radio" name="image_mode" value="paste_url"{paste_checked}> Paste URL</label>
<label class="mode-upload">Image file <input type="file" name="image_file" accept="{accept}"></label>
<label class="mode-paste_url">Image link <input type="text" name="image_url" value="{pasted}"></label>
</fieldset>
<button type="submit">Save Product</button>
</form>"#,
        name = escape(&form.name),
        price = escape(&form.price),
        stock = escape(&form.stock),
        pasted = escape(pasted),
    );
    html
}

fn notice_html(notice: &Notice) -> String {
    let class = match notice.level {
        NoticeLevel::Success => "success",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!(
        "<p class=\"notice {class}\">{}</p>",
        escape(&notice.text)
    )
}

fn live_reload_script() -> String {
    format!(
        r##"
const form = document.getElementById("product-form");
const syncMode = () => {{
  const mode = form.querySelector("input[name=image_mode]:checked").value;
  form.querySelectorAll("[class^=mode-]").forEach((el) => {{
    const on = el.classList.contains("mode-" + mode);
    el.hidden = !on;
    if (!on) el.querySelector("input").value = "";
  }});
}};
form.querySelectorAll("input[name=image_mode]").forEach((el) => el.addEventListener("change", syncMode));
syncMode();
const source = new EventSource("/api/catalog/events");
source.addEventListener("{CATALOG_CHANGED_EVENT}", async () => {{
  const input = document.querySelector("#search input[name=q]");
  const q = input ? input.value : "";
  const res = await fetch("/?q=" + encodeURIComponent(q));
  const doc = new DOMParser().parseFromString(await res.text(), "text/html");
  const fresh = doc.getElementById("inventory-content");
  if (fresh) document.getElementById("inventory-content").replaceWith(fresh);
}});
"##
    )
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0 auto;max-width:1100px;padding:1rem}\
nav a{margin-right:1rem}nav a.active{font-weight:bold}\
section{display:none}section.active,section:target{display:block}\
body:has(section:target) section.active:not(:target){display:none}\
.grid{display:grid;grid-template-columns:repeat(3,1fr);gap:1rem}\
.column{display:flex;flex-direction:column;gap:1rem}\
.tile{border:1px solid #ddd;border-radius:8px;padding:.75rem}\
.tile img{width:100%}.placeholder{padding:2rem;text-align:center;background:#f3f3f3}\
.price span{font-size:1.5rem}\
.notice{padding:.5rem .75rem;border-radius:6px}\
.notice.success{background:#e6f6e6}.notice.info{background:#e8f0fb}\
.notice.warning{background:#fff4d6}.notice.error{background:#fde4e4}\
form label{display:block;margin:.5rem 0}";
