//! Desktop shell: an image gallery and a polygon annotation view.

use eframe::egui;
use log::{info, warn};

use crate::annotator::Annotator;
use crate::catalog::ImageCatalog;
use crate::config::AppConfig;
use crate::egui_surface::{EguiSurface, ImageTransform};
use crate::error::Result;
use crate::geometry::{fit_within, Point};
use crate::route::Route;
use crate::style::DrawingStyle;
use crate::surface::SurfaceEvent;

const THUMBNAIL_SIZE: egui::Vec2 = egui::vec2(240.0, 160.0);

// ── Annotate view ───────────────────────────────────────────────────────────

struct AnnotateView {
    image_id: String,
    title: String,
    raw_image: Option<image::DynamicImage>,
    texture: Option<egui::TextureHandle>,
    image_size: (f32, f32),
    load_error: Option<String>,
    last_pointer: Option<Point>,
    annotator: Annotator<EguiSurface>,
}

impl AnnotateView {
    fn open(catalog: &ImageCatalog, id: &str, style: &DrawingStyle) -> Result<Self> {
        let source = catalog.find(id)?;
        let (raw_image, load_error) = match source.load() {
            Ok(img) => (Some(img), None),
            Err(e) => {
                warn!("could not load {}: {e}", source.path.display());
                (None, Some(format!("Could not load {}: {e}", source.path.display())))
            }
        };
        let image_size = raw_image
            .as_ref()
            .map(|img| (img.width() as f32, img.height() as f32))
            .unwrap_or((800.0, 600.0));
        let annotator = Annotator::with_masks(
            EguiSurface::new(style),
            style.clone(),
            catalog.annotations(id),
        );
        Ok(Self {
            image_id: source.id.clone(),
            title: source.title.clone(),
            raw_image,
            texture: None,
            image_size,
            load_error,
            last_pointer: None,
            annotator,
        })
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(img) = self.raw_image.take() {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            self.texture = Some(ctx.load_texture(
                format!("image-{}", self.image_id),
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    fn canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let canvas_rect = response.rect;
        painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

        let (w, h) = fit_within(self.image_size, (canvas_rect.width(), canvas_rect.height()));
        let image_rect = egui::Rect::from_center_size(canvas_rect.center(), egui::vec2(w, h));
        let transform = ImageTransform {
            origin: image_rect.min,
            scale: if self.image_size.0 > 0.0 { w / self.image_size.0 } else { 1.0 },
        };
        self.annotator.surface_mut().set_transform(transform);

        if let Some(tex) = &self.texture {
            painter.image(
                tex.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        let pointer = response
            .hover_pos()
            .filter(|pos| image_rect.contains(*pos))
            .map(|pos| transform.to_image(pos));
        let events = match pointer {
            Some(p) if self.last_pointer != Some(p) || self.annotator.surface().needs_hover_refresh() => {
                self.annotator.surface_mut().track_pointer(p)
            }
            Some(_) => Vec::new(),
            None => self.annotator.surface_mut().pointer_left(),
        };
        self.last_pointer = pointer;
        for event in events {
            self.annotator.dispatch(event);
        }
        if pointer.is_some() && ctx.input(|i| i.pointer.primary_pressed()) {
            self.annotator.dispatch(SurfaceEvent::PointerDown);
        }

        self.annotator.surface().paint(&painter);
    }

    fn mask_list(&self, ui: &mut egui::Ui) {
        ui.heading("Masks");
        ui.separator();
        let masks = self.annotator.registry().masks();
        if masks.is_empty() {
            ui.label("None yet");
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, mask) in masks.iter().enumerate() {
                ui.label(format!(
                    "#{}  {} vertices, {:.0} px²",
                    i + 1,
                    mask.base_vertices().len(),
                    mask.area()
                ));
            }
        });
    }
}

// ── App ─────────────────────────────────────────────────────────────────────

enum View {
    Gallery,
    Annotate(Box<AnnotateView>),
}

pub struct PolymaskApp {
    config: AppConfig,
    catalog: ImageCatalog,
    view: View,
    status: Option<String>,
}

impl PolymaskApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let catalog = ImageCatalog::new(config.images.clone());
        Self {
            config,
            catalog,
            view: View::Gallery,
            status: None,
        }
    }

    pub fn route(&self) -> Route {
        match &self.view {
            View::Gallery => Route::Gallery,
            View::Annotate(view) => Route::Annotate {
                id: view.image_id.clone(),
            },
        }
    }

    /// Switch views. Masks committed in the annotate view are kept in the
    /// catalog; an unfinished polygon is discarded.
    pub fn navigate(&mut self, route: Route) {
        info!("navigating from {} to {route}", self.route());
        if let View::Annotate(view) = std::mem::replace(&mut self.view, View::Gallery) {
            let view = *view;
            let (_, masks) = view.annotator.into_parts();
            if let Err(e) = self.catalog.set_annotations(&view.image_id, masks) {
                warn!("dropping masks: {e}");
            }
        }
        self.status = None;
        if let Route::Annotate { id } = route {
            match AnnotateView::open(&self.catalog, &id, &self.config.style) {
                Ok(view) => self.view = View::Annotate(Box::new(view)),
                Err(e) => {
                    warn!("{e}");
                    self.status = Some(e.to_string());
                }
            }
        }
    }

    fn gallery(&mut self, ctx: &egui::Context) -> Option<Route> {
        let mut next = None;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Select an image");
                ui.separator();
                if ui.button("Add image…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tiff"])
                        .pick_file()
                    {
                        self.catalog.add_image(&path);
                    }
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for source in self.catalog.images() {
                        let masks = self.catalog.annotations(&source.id).len();
                        ui.vertical(|ui| {
                            let uri = format!("file://{}", source.path.display());
                            let thumb = ui.add(
                                egui::Image::new(uri)
                                    .max_size(THUMBNAIL_SIZE)
                                    .sense(egui::Sense::click()),
                            );
                            let title = ui.button(&source.title);
                            ui.label(format!("{masks} masks"));
                            if thumb.clicked() || title.clicked() {
                                next = Some(Route::Annotate {
                                    id: source.id.clone(),
                                });
                            }
                        });
                        ui.add_space(12.0);
                    }
                });
            });
        });

        next
    }

    fn annotate(ctx: &egui::Context, view: &mut AnnotateView) -> Option<Route> {
        let mut next = None;
        view.ensure_texture(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            next = Some(Route::Gallery);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Gallery").clicked() {
                    next = Some(Route::Gallery);
                }
                ui.separator();
                ui.strong(&view.title);
                ui.separator();
                ui.label(format!("{} masks", view.annotator.registry().len()));
                ui.separator();
                let vertices = view.annotator.session().vertices().len();
                if vertices == 0 {
                    ui.label("Click to place the first vertex");
                } else {
                    ui.label(format!("{vertices} vertices, click the first one to close"));
                }
                if let Some(err) = &view.load_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });

        egui::SidePanel::right("masks").show(ctx, |ui| view.mask_list(ui));

        egui::CentralPanel::default().show(ctx, |ui| view.canvas(ctx, ui));

        next
    }
}

impl eframe::App for PolymaskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let next = match &mut self.view {
            View::Gallery => self.gallery(ctx),
            View::Annotate(view) => Self::annotate(ctx, view),
        };
        if let Some(route) = next {
            self.navigate(route);
        }
    }
}
