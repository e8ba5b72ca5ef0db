use crate::RenderError;
use crate::html::escape_html;
use pagewright_document::{BlockInstance, Document, ZoneId};
use pagewright_schema::{SchemaRegistry, SlotRenderer};
use std::cell::RefCell;

/// Options for page rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pretty print the page skeleton
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Editor-mode rendering (zone outlines)
    pub editing: bool,
    /// Deepest zone nesting rendered before giving up
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            editing: false,
            max_depth: 32,
        }
    }
}

struct Context {
    options: RenderOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Shared state for one render pass
struct Pass<'a> {
    document: &'a Document,
    registry: &'a SchemaRegistry,
    options: &'a RenderOptions,
    error: RefCell<Option<RenderError>>,
}

impl<'a> Pass<'a> {
    fn render_block(&self, block: &BlockInstance, depth: usize) -> String {
        let schema = match self.registry.get_schema(&block.block_type) {
            Some(schema) => schema,
            None => return unrenderable(block, "unknown block type"),
        };
        let render = match schema.render() {
            Some(render) => render,
            None => return unrenderable(block, "not loaded"),
        };

        let slots = BlockSlots {
            pass: self,
            block_id: block.id(),
            depth,
        };
        render.render(&block.props, &slots)
    }

    fn fail(&self, error: RenderError) {
        let mut slot = self.error.borrow_mut();
        if slot.is_none() {
            *slot = Some(error);
        }
    }
}

fn unrenderable(block: &BlockInstance, reason: &str) -> String {
    tracing::debug!(block_type = %block.block_type, reason, "skipping block");
    format!(
        "<!-- {}: {} -->",
        escape_html(&block.block_type).replace("--", "- -"),
        reason
    )
}

/// Zones of the block being rendered
struct BlockSlots<'p, 'a> {
    pass: &'p Pass<'a>,
    block_id: Option<&'p str>,
    depth: usize,
}

impl SlotRenderer for BlockSlots<'_, '_> {
    fn render_zone(&self, zone: &str) -> String {
        let block_id = match self.block_id {
            Some(id) => id,
            None => return String::new(),
        };
        let zone = ZoneId::new(block_id, zone);

        if self.depth >= self.pass.options.max_depth {
            self.pass.fail(RenderError::DepthExceeded {
                zone: zone.key(),
                limit: self.pass.options.max_depth,
            });
            return String::new();
        }

        self.pass
            .document
            .zone(&zone)
            .iter()
            .map(|block| self.pass.render_block(block, self.depth + 1))
            .collect()
    }

    fn is_editing(&self) -> bool {
        self.pass.options.editing
    }
}

/// Render the document's top-level content, one fragment per block.
///
/// Types without a render capability become HTML comments.
pub fn render_blocks(
    document: &Document,
    registry: &SchemaRegistry,
    options: &RenderOptions,
) -> Result<Vec<String>, RenderError> {
    let pass = Pass {
        document,
        registry,
        options,
        error: RefCell::new(None),
    };

    let fragments = document
        .content
        .iter()
        .map(|block| pass.render_block(block, 0))
        .collect();

    match pass.error.into_inner() {
        Some(error) => Err(error),
        None => Ok(fragments),
    }
}

/// Render a complete HTML page for the document
pub fn render_document(
    document: &Document,
    registry: &SchemaRegistry,
    options: RenderOptions,
) -> Result<String, RenderError> {
    let fragments = render_blocks(document, registry, &options)?;
    let title = document.title().unwrap_or("Untitled");

    let mut ctx = Context::new(options);
    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<main class=\"pagewright-page\">");
    ctx.indent();
    for fragment in &fragments {
        ctx.add_line(fragment);
    }
    ctx.dedent();
    ctx.add_line("</main>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}
