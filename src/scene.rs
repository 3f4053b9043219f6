use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::texture::Surface;

/// Interleaved vertex layout shared by every batch.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// When a batch is drawn relative to the day/night state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Always,
    DayOnly,
    NightOnly,
}

/// A fixed polygon list sharing one texture binding and one color.
///
/// Batches are authored directly in room-space coordinates; there is no
/// model-transform hierarchy at draw time.
#[derive(Debug, Clone)]
pub struct MeshBatch {
    pub label: &'static str,
    pub surface: Option<Surface>,
    pub color: Vec4,
    /// Unlit batches skip the lighting equation entirely (glow, shaft,
    /// shadows).
    pub unlit: bool,
    pub visibility: Visibility,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBatch {
    fn new(label: &'static str, surface: Option<Surface>, color: Vec4) -> Self {
        Self {
            label,
            surface,
            color,
            unlit: false,
            visibility: Visibility::Always,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }

    fn visible(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn quad(&mut self, corners: [Vec3; 4], normal: Vec3, uvs: [Vec2; 4]) {
        let base = self.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs.iter()) {
            self.vertices.push(Vertex {
                position: corner.to_array(),
                normal: normal.to_array(),
                uv: uv.to_array(),
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn tri(&mut self, points: [Vec3; 3], normal: Vec3, uvs: [Vec2; 3]) {
        let base = self.vertices.len() as u32;
        for (point, uv) in points.iter().zip(uvs.iter()) {
            self.vertices.push(Vertex {
                position: point.to_array(),
                normal: normal.to_array(),
                uv: uv.to_array(),
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Axis-aligned box spanning `min`..`max`, all six faces, outward
    /// normals.
    fn box_between(&mut self, min: Vec3, max: Vec3, uv: Vec2) {
        let (a, b) = (min, max);
        let uvs = rect_uv(uv);
        // top / bottom
        self.quad(
            [
                Vec3::new(a.x, b.y, b.z),
                Vec3::new(b.x, b.y, b.z),
                Vec3::new(b.x, b.y, a.z),
                Vec3::new(a.x, b.y, a.z),
            ],
            Vec3::Y,
            uvs,
        );
        self.quad(
            [
                Vec3::new(a.x, a.y, a.z),
                Vec3::new(b.x, a.y, a.z),
                Vec3::new(b.x, a.y, b.z),
                Vec3::new(a.x, a.y, b.z),
            ],
            Vec3::NEG_Y,
            uvs,
        );
        // front (+Z) / back (-Z)
        self.quad(
            [
                Vec3::new(a.x, a.y, b.z),
                Vec3::new(b.x, a.y, b.z),
                Vec3::new(b.x, b.y, b.z),
                Vec3::new(a.x, b.y, b.z),
            ],
            Vec3::Z,
            uvs,
        );
        self.quad(
            [
                Vec3::new(b.x, a.y, a.z),
                Vec3::new(a.x, a.y, a.z),
                Vec3::new(a.x, b.y, a.z),
                Vec3::new(b.x, b.y, a.z),
            ],
            Vec3::NEG_Z,
            uvs,
        );
        // right (+X) / left (-X)
        self.quad(
            [
                Vec3::new(b.x, a.y, b.z),
                Vec3::new(b.x, a.y, a.z),
                Vec3::new(b.x, b.y, a.z),
                Vec3::new(b.x, b.y, b.z),
            ],
            Vec3::X,
            uvs,
        );
        self.quad(
            [
                Vec3::new(a.x, a.y, a.z),
                Vec3::new(a.x, a.y, b.z),
                Vec3::new(a.x, b.y, b.z),
                Vec3::new(a.x, b.y, a.z),
            ],
            Vec3::NEG_X,
            uvs,
        );
    }

    /// Unit cube (side 1, centered at the origin) pushed through an
    /// arbitrary transform. Used for rotated or scaled props.
    fn unit_box(&mut self, transform: Mat4) {
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        let h = 0.5;
        let faces: [([Vec3; 4], Vec3); 6] = [
            (
                [
                    Vec3::new(-h, -h, h),
                    Vec3::new(h, -h, h),
                    Vec3::new(h, h, h),
                    Vec3::new(-h, h, h),
                ],
                Vec3::Z,
            ),
            (
                [
                    Vec3::new(h, -h, -h),
                    Vec3::new(-h, -h, -h),
                    Vec3::new(-h, h, -h),
                    Vec3::new(h, h, -h),
                ],
                Vec3::NEG_Z,
            ),
            (
                [
                    Vec3::new(-h, h, h),
                    Vec3::new(h, h, h),
                    Vec3::new(h, h, -h),
                    Vec3::new(-h, h, -h),
                ],
                Vec3::Y,
            ),
            (
                [
                    Vec3::new(-h, -h, -h),
                    Vec3::new(h, -h, -h),
                    Vec3::new(h, -h, h),
                    Vec3::new(-h, -h, h),
                ],
                Vec3::NEG_Y,
            ),
            (
                [
                    Vec3::new(h, -h, h),
                    Vec3::new(h, -h, -h),
                    Vec3::new(h, h, -h),
                    Vec3::new(h, h, h),
                ],
                Vec3::X,
            ),
            (
                [
                    Vec3::new(-h, -h, -h),
                    Vec3::new(-h, -h, h),
                    Vec3::new(-h, h, h),
                    Vec3::new(-h, h, -h),
                ],
                Vec3::NEG_X,
            ),
        ];
        for (corners, normal) in faces {
            let transformed = corners.map(|corner| transform.transform_point3(corner));
            let normal = (normal_matrix * normal).normalize_or_zero();
            self.quad(transformed, normal, rect_uv(Vec2::ONE));
        }
    }

    /// Thin box standing in for a GL line segment.
    fn beam(&mut self, from: Vec3, to: Vec3, half: f32) {
        let mut min = from.min(to);
        let mut max = from.max(to);
        for i in 0..3 {
            if max[i] - min[i] < half * 2.0 {
                let mid = 0.5 * (min[i] + max[i]);
                min[i] = mid - half;
                max[i] = mid + half;
            }
        }
        self.box_between(min, max, Vec2::ONE);
    }

    /// Cone with its base circle at `base` and apex `height` above it.
    fn cone(&mut self, base: Vec3, radius: f32, height: f32, segments: u32) {
        let apex = base + Vec3::new(0.0, height, 0.0);
        for i in 0..segments {
            let a0 = (i as f32 / segments as f32) * std::f32::consts::TAU;
            let a1 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;
            let p0 = base + Vec3::new(radius * a0.cos(), 0.0, radius * a0.sin());
            let p1 = base + Vec3::new(radius * a1.cos(), 0.0, radius * a1.sin());
            let side = (p1 - p0).cross(apex - p0).normalize_or_zero();
            self.tri(
                [p0, p1, apex],
                side,
                [Vec2::ZERO, Vec2::X, Vec2::new(0.5, 1.0)],
            );
            self.tri([p1, p0, base], Vec3::NEG_Y, [Vec2::X, Vec2::ZERO, Vec2::ONE]);
        }
    }

    /// Low-poly UV sphere.
    fn sphere(&mut self, center: Vec3, radius: f32, slices: u32, stacks: u32) {
        let base = self.vertices.len() as u32;
        for stack in 0..=stacks {
            let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
            for slice in 0..=slices {
                let theta = std::f32::consts::TAU * slice as f32 / slices as f32;
                let normal = Vec3::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                );
                self.vertices.push(Vertex {
                    position: (center + normal * radius).to_array(),
                    normal: normal.to_array(),
                    uv: [slice as f32 / slices as f32, stack as f32 / stacks as f32],
                });
            }
        }
        let ring = slices + 1;
        for stack in 0..stacks {
            for slice in 0..slices {
                let i0 = base + stack * ring + slice;
                let i1 = i0 + ring;
                self.indices
                    .extend_from_slice(&[i0, i1, i0 + 1, i0 + 1, i1, i1 + 1]);
            }
        }
    }
}

fn rect_uv(scale: Vec2) -> [Vec2; 4] {
    [
        Vec2::ZERO,
        Vec2::new(scale.x, 0.0),
        scale,
        Vec2::new(0.0, scale.y),
    ]
}

/// The complete static scene, split into the two draw lists the frame
/// composer walks in order: every opaque batch first, then the transparent
/// batches.
#[derive(Debug, Clone, Default)]
pub struct SceneGeometry {
    pub opaque: Vec<MeshBatch>,
    pub transparent: Vec<MeshBatch>,
}

impl SceneGeometry {
    pub fn batch_count(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }
}

const WHITE: Vec4 = Vec4::ONE;
const SOVIET_RED: Vec4 = Vec4::new(0.7, 0.1, 0.1, 1.0);
const GOLD: Vec4 = Vec4::new(0.8, 0.7, 0.1, 1.0);
const DARK_WOOD: Vec4 = Vec4::new(0.3, 0.2, 0.15, 1.0);
const CONCRETE_GRAY: Vec4 = Vec4::new(0.4, 0.4, 0.4, 1.0);

/// Builds every object's geometry. Pure content: calling this twice yields
/// identical data.
pub fn build_scene() -> SceneGeometry {
    let mut scene = SceneGeometry::default();
    room(&mut scene);
    carpet(&mut scene);
    desk(&mut scene);
    chair(&mut scene);
    radio(&mut scene);
    books(&mut scene);
    window(&mut scene);
    shelves(&mut scene);
    desk_lamp(&mut scene);
    documents(&mut scene);
    cap_and_papers(&mut scene);
    couch(&mut scene);
    sunlight_shaft(&mut scene);
    scene
}

fn room(scene: &mut SceneGeometry) {
    let mut floor = MeshBatch::new("floor", Some(Surface::Ground), WHITE);
    floor.quad(
        [
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(-5.0, 0.0, 5.0),
        ],
        Vec3::Y,
        rect_uv(Vec2::splat(4.0)),
    );
    scene.opaque.push(floor);

    let mut walls = MeshBatch::new("walls", Some(Surface::Wallpaper), WHITE);
    // back wall
    walls.quad(
        [
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, -5.0),
            Vec3::new(5.0, 5.0, -5.0),
            Vec3::new(-5.0, 5.0, -5.0),
        ],
        Vec3::Z,
        rect_uv(Vec2::splat(2.0)),
    );
    // left wall (carries the window)
    walls.quad(
        [
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(-5.0, 0.0, 5.0),
            Vec3::new(-5.0, 5.0, 5.0),
            Vec3::new(-5.0, 5.0, -5.0),
        ],
        Vec3::X,
        rect_uv(Vec2::splat(2.0)),
    );
    // right wall
    walls.quad(
        [
            Vec3::new(5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(5.0, 5.0, -5.0),
        ],
        Vec3::NEG_X,
        rect_uv(Vec2::splat(2.0)),
    );
    scene.opaque.push(walls);

    let mut ceiling = MeshBatch::new("ceiling", None, CONCRETE_GRAY);
    ceiling.quad(
        [
            Vec3::new(-5.0, 5.0, -5.0),
            Vec3::new(5.0, 5.0, -5.0),
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(-5.0, 5.0, 5.0),
        ],
        Vec3::NEG_Y,
        rect_uv(Vec2::ONE),
    );
    scene.opaque.push(ceiling);
}

fn carpet(scene: &mut SceneGeometry) {
    let mut rug = MeshBatch::new("carpet", Some(Surface::Carpet), WHITE);
    rug.quad(
        [
            Vec3::new(-2.5, 0.01, -2.0),
            Vec3::new(2.5, 0.01, -2.0),
            Vec3::new(2.5, 0.01, 2.5),
            Vec3::new(-2.5, 0.01, 2.5),
        ],
        Vec3::Y,
        rect_uv(Vec2::splat(2.0)),
    );
    scene.opaque.push(rug);

    // gold trim around the rug edge
    let mut trim = MeshBatch::new("carpet-trim", None, GOLD);
    let y = 0.02;
    trim.beam(Vec3::new(-2.5, y, -2.0), Vec3::new(2.5, y, -2.0), 0.02);
    trim.beam(Vec3::new(2.5, y, -2.0), Vec3::new(2.5, y, 2.5), 0.02);
    trim.beam(Vec3::new(2.5, y, 2.5), Vec3::new(-2.5, y, 2.5), 0.02);
    trim.beam(Vec3::new(-2.5, y, 2.5), Vec3::new(-2.5, y, -2.0), 0.02);
    scene.opaque.push(trim);
}

fn desk(scene: &mut SceneGeometry) {
    let mut top = MeshBatch::new("desk-top", Some(Surface::Wood), WHITE);
    top.box_between(
        Vec3::new(-2.0, 0.92, -1.0),
        Vec3::new(2.0, 1.0, 1.0),
        Vec2::new(2.0, 1.0),
    );
    scene.opaque.push(top);

    let mut legs = MeshBatch::new("desk-legs", None, DARK_WOOD);
    legs.box_between(
        Vec3::new(-1.8, 0.0, -0.8),
        Vec3::new(-1.6, 0.92, -0.65),
        Vec2::ONE,
    );
    legs.box_between(
        Vec3::new(1.6, 0.0, -0.8),
        Vec3::new(1.8, 0.92, -0.65),
        Vec2::ONE,
    );
    legs.box_between(
        Vec3::new(-1.8, 0.0, 0.65),
        Vec3::new(-1.6, 0.92, 0.8),
        Vec2::ONE,
    );
    legs.box_between(
        Vec3::new(1.6, 0.0, 0.65),
        Vec3::new(1.8, 0.92, 0.8),
        Vec2::ONE,
    );
    scene.opaque.push(legs);
}

fn chair(scene: &mut SceneGeometry) {
    let mut seat = MeshBatch::new("chair", Some(Surface::Wood), WHITE);
    seat.box_between(
        Vec3::new(-0.5, 0.54, 0.5),
        Vec3::new(0.5, 0.6, 1.5),
        Vec2::ONE,
    );
    // backrest
    seat.box_between(
        Vec3::new(-0.5, 0.6, 1.5),
        Vec3::new(0.5, 1.5, 1.55),
        Vec2::ONE,
    );
    scene.opaque.push(seat);

    let mut legs = MeshBatch::new("chair-legs", Some(Surface::Wood), DARK_WOOD);
    legs.box_between(
        Vec3::new(-0.4, 0.0, 0.6),
        Vec3::new(-0.34, 0.54, 0.66),
        Vec2::ONE,
    );
    legs.box_between(
        Vec3::new(0.34, 0.0, 0.6),
        Vec3::new(0.4, 0.54, 0.66),
        Vec2::ONE,
    );
    legs.box_between(
        Vec3::new(-0.4, 0.0, 1.4),
        Vec3::new(-0.34, 0.54, 1.46),
        Vec2::ONE,
    );
    legs.box_between(
        Vec3::new(0.34, 0.0, 1.4),
        Vec3::new(0.4, 0.54, 1.46),
        Vec2::ONE,
    );
    scene.opaque.push(legs);
}

fn radio(scene: &mut SceneGeometry) {
    let mut body = MeshBatch::new("radio", None, CONCRETE_GRAY);
    body.box_between(
        Vec3::new(-0.6, 1.1, -0.95),
        Vec3::new(0.6, 1.8, -0.7),
        Vec2::ONE,
    );
    scene.opaque.push(body);

    // recessed speaker grille slats on the front face
    let mut grille = MeshBatch::new("radio-grille", None, Vec4::new(0.15, 0.15, 0.15, 1.0));
    for i in 0..4 {
        let x = -0.35 + i as f32 * 0.2;
        grille.quad(
            [
                Vec3::new(x, 1.35, -0.699),
                Vec3::new(x + 0.14, 1.35, -0.699),
                Vec3::new(x + 0.14, 1.65, -0.699),
                Vec3::new(x, 1.65, -0.699),
            ],
            Vec3::Z,
            rect_uv(Vec2::ONE),
        );
    }
    scene.opaque.push(grille);

    let mut knob = MeshBatch::new("radio-knob", None, GOLD);
    knob.sphere(Vec3::new(0.55, 1.45, -0.69), 0.04, 12, 8);
    scene.opaque.push(knob);

    let mut antenna = MeshBatch::new("radio-antenna", None, Vec4::new(0.8, 0.8, 0.8, 1.0));
    antenna.beam(Vec3::new(0.0, 1.8, -0.95), Vec3::new(0.0, 2.7, -1.0), 0.01);
    scene.opaque.push(antenna);

    let mut shadow = shadow_batch("radio-shadow", 0.25);
    shadow.quad(
        [
            Vec3::new(-0.65, 1.005, -0.9),
            Vec3::new(0.65, 1.005, -0.9),
            Vec3::new(0.65, 1.005, -0.7),
            Vec3::new(-0.65, 1.005, -0.7),
        ],
        Vec3::Y,
        rect_uv(Vec2::ONE),
    );
    scene.transparent.push(shadow);
}

fn books(scene: &mut SceneGeometry) {
    let mut red = MeshBatch::new("book-red", None, SOVIET_RED);
    red.box_between(
        Vec3::new(0.5, 1.01, -0.35),
        Vec3::new(1.0, 1.2, -0.25),
        Vec2::ONE,
    );
    scene.opaque.push(red);

    let mut gold = MeshBatch::new("book-gold", None, GOLD);
    gold.box_between(
        Vec3::new(0.5, 1.21, -0.45),
        Vec3::new(1.0, 1.35, -0.35),
        Vec2::ONE,
    );
    scene.opaque.push(gold);

    // loose sheets leaning against the book stack
    let mut sheets = MeshBatch::new("book-sheets", Some(Surface::Paper), WHITE);
    for i in 0..3 {
        let offset = i as f32 * 0.005;
        sheets.quad(
            [
                Vec3::new(-1.0 + offset, 1.01 + offset, 0.0),
                Vec3::new(-0.5 + offset, 1.01 + offset, 0.0),
                Vec3::new(-0.5 + offset, 1.05 + offset, 0.0),
                Vec3::new(-1.0 + offset, 1.05 + offset, 0.0),
            ],
            Vec3::Z,
            rect_uv(Vec2::ONE),
        );
    }
    scene.opaque.push(sheets);
}

fn window(scene: &mut SceneGeometry) {
    // frame backing behind the panes
    let mut frame = MeshBatch::new("window-frame", None, DARK_WOOD);
    frame.quad(
        [
            Vec3::new(-4.99, 1.5, -1.0),
            Vec3::new(-4.99, 1.5, 1.0),
            Vec3::new(-4.99, 3.5, 1.0),
            Vec3::new(-4.99, 3.5, -1.0),
        ],
        Vec3::X,
        rect_uv(Vec2::ONE),
    );
    scene.opaque.push(frame);

    // gold cross dividing the four panes
    let mut dividers = MeshBatch::new("window-dividers", None, GOLD);
    dividers.beam(Vec3::new(-4.98, 1.5, 0.0), Vec3::new(-4.98, 3.5, 0.0), 0.015);
    dividers.beam(
        Vec3::new(-4.98, 2.5, -1.0),
        Vec3::new(-4.98, 2.5, 1.0),
        0.015,
    );
    scene.opaque.push(dividers);

    // four glass panes, slightly proud of the frame
    let mut glass = MeshBatch::new(
        "window-glass",
        Some(Surface::Glass),
        Vec4::new(0.9, 0.9, 1.0, 0.7),
    )
    .unlit();
    let panes = [
        (2.5, 3.5, -1.0, 0.0),
        (2.5, 3.5, 0.0, 1.0),
        (1.5, 2.5, -1.0, 0.0),
        (1.5, 2.5, 0.0, 1.0),
    ];
    for (y0, y1, z0, z1) in panes {
        glass.quad(
            [
                Vec3::new(-4.985, y0, z0),
                Vec3::new(-4.985, y0, z1),
                Vec3::new(-4.985, y1, z1),
                Vec3::new(-4.985, y1, z0),
            ],
            Vec3::X,
            rect_uv(Vec2::ONE),
        );
    }
    scene.transparent.push(glass);
}

fn shelves(scene: &mut SceneGeometry) {
    let mut boards = MeshBatch::new("shelves", Some(Surface::Wood), WHITE);
    let mut brackets = MeshBatch::new("shelf-brackets", None, GOLD);
    for i in 0..3 {
        let shelf_y = 1.5 + i as f32;
        boards.box_between(
            Vec3::new(-1.5, shelf_y - 0.08, -4.5),
            Vec3::new(1.5, shelf_y, -4.2),
            Vec2::new(2.0, 0.2),
        );
        brackets.box_between(
            Vec3::new(-1.65, shelf_y - 0.23, -4.5),
            Vec3::new(-1.5, shelf_y - 0.08, -4.47),
            Vec2::ONE,
        );
        brackets.box_between(
            Vec3::new(1.5, shelf_y - 0.23, -4.5),
            Vec3::new(1.65, shelf_y - 0.08, -4.47),
            Vec2::ONE,
        );
    }
    scene.opaque.push(boards);
    scene.opaque.push(brackets);

    let mut red_book = MeshBatch::new("shelf-book-red", None, SOVIET_RED);
    red_book.box_between(
        Vec3::new(-1.2, 1.51, -4.45),
        Vec3::new(-0.8, 1.71, -4.42),
        Vec2::ONE,
    );
    scene.opaque.push(red_book);

    let mut gold_book = MeshBatch::new("shelf-book-gold", None, GOLD);
    gold_book.box_between(
        Vec3::new(0.5, 2.51, -4.45),
        Vec3::new(1.0, 2.66, -4.42),
        Vec2::ONE,
    );
    scene.opaque.push(gold_book);
}

fn desk_lamp(scene: &mut SceneGeometry) {
    let mut base = MeshBatch::new("lamp-base", None, CONCRETE_GRAY);
    base.unit_box(
        Mat4::from_translation(Vec3::new(1.5, 1.0, 0.3))
            * Mat4::from_scale(Vec3::new(0.15, 0.05, 0.15)),
    );
    scene.opaque.push(base);

    let mut post = MeshBatch::new("lamp-post", None, DARK_WOOD);
    post.beam(Vec3::new(1.5, 1.05, 0.3), Vec3::new(1.5, 2.0, 0.3), 0.015);
    scene.opaque.push(post);

    let mut head = MeshBatch::new("lamp-head", None, SOVIET_RED);
    head.cone(Vec3::new(1.5, 2.0, 0.3), 0.2, 0.3, 20);
    scene.opaque.push(head);

    // soft glow sprite around the bulb, visual bloom only
    let mut glow = MeshBatch::new("lamp-glow", None, Vec4::new(1.0, 1.0, 0.8, 0.3))
        .unlit()
        .visible(Visibility::NightOnly);
    glow.sphere(Vec3::new(1.5, 2.2, 0.3), 0.3, 10, 10);
    scene.transparent.push(glow);
}

fn documents(scene: &mut SceneGeometry) {
    let mut papers = MeshBatch::new("documents", Some(Surface::Paper), WHITE);
    let mut shadows = shadow_batch("document-shadows", 0.15);
    // stack on the right side of the desk, each sheet slightly bent upward
    for i in 0..3 {
        let o = i as f32 * 0.02;
        curved_sheet(
            &mut papers,
            Vec3::new(0.2 + o, 1.01 + o, -0.7 + o),
            Vec3::new(1.2 + o, 1.01 + o, -0.2 + o),
        );
        shadows.quad(
            [
                Vec3::new(0.18 + o, 1.003 + o, -0.72 + o),
                Vec3::new(1.22 + o, 1.003 + o, -0.72 + o),
                Vec3::new(1.22 + o, 1.003 + o, -0.18 + o),
                Vec3::new(0.18 + o, 1.003 + o, -0.18 + o),
            ],
            Vec3::Y,
            rect_uv(Vec2::ONE),
        );
    }
    // flat stack in the middle
    for i in 0..2 {
        let o = i as f32 * 0.03;
        papers.quad(
            [
                Vec3::new(-1.3 + o, 1.01 + o, 0.2),
                Vec3::new(-0.5 + o, 1.01 + o, 0.2),
                Vec3::new(-0.5 + o, 1.02, 0.7),
                Vec3::new(-1.3 + o, 1.02, 0.7),
            ],
            Vec3::Y,
            rect_uv(Vec2::ONE),
        );
    }
    scene.opaque.push(papers);
    scene.transparent.push(shadows);

    let mut inkwell = MeshBatch::new("inkwell", None, CONCRETE_GRAY);
    inkwell.unit_box(
        Mat4::from_translation(Vec3::new(-1.5, 1.05, -0.7)) * Mat4::from_scale(Vec3::splat(0.15)),
    );
    scene.opaque.push(inkwell);

    let mut pen = MeshBatch::new("pen", None, GOLD);
    pen.beam(Vec3::new(-1.5, 1.2, -0.7), Vec3::new(-1.5, 1.5, -0.65), 0.012);
    scene.opaque.push(pen);
}

fn cap_and_papers(scene: &mut SceneGeometry) {
    let mut cap = MeshBatch::new("workers-cap", None, SOVIET_RED);
    cap.cone(Vec3::new(-1.0, 1.05, 0.5), 0.3, 0.2, 20);
    scene.opaque.push(cap);

    let mut star = MeshBatch::new("cap-star", None, GOLD);
    star.sphere(Vec3::new(-1.0, 1.26, 0.5), 0.02, 8, 6);
    scene.opaque.push(star);

    let mut papers = MeshBatch::new("scattered-papers", Some(Surface::Paper), WHITE);
    let mut shadows = shadow_batch("paper-shadows", 0.18);
    for i in 0..3 {
        let o = i as f32 * 0.03;
        curved_sheet(
            &mut papers,
            Vec3::new(-1.5 + o, 1.01, -0.5 + o),
            Vec3::new(-1.0 + o, 1.01, -0.3 + o),
        );
        shadows.quad(
            [
                Vec3::new(-1.52 + o, 1.003, -0.52 + o),
                Vec3::new(-0.98 + o, 1.003, -0.52 + o),
                Vec3::new(-0.98 + o, 1.003, -0.28 + o),
                Vec3::new(-1.52 + o, 1.003, -0.28 + o),
            ],
            Vec3::Y,
            rect_uv(Vec2::ONE),
        );
    }
    scene.opaque.push(papers);
    scene.transparent.push(shadows);
}

fn couch(scene: &mut SceneGeometry) {
    let mut cushions = MeshBatch::new("couch", Some(Surface::Couch), WHITE);
    // seat against the right wall
    cushions.box_between(
        Vec3::new(4.3, 0.0, -1.5),
        Vec3::new(4.9, 0.4, 1.5),
        Vec2::new(3.0, 1.0),
    );
    // angled backrest, approximated by a straight slab
    cushions.box_between(
        Vec3::new(4.48, 0.4, -1.5),
        Vec3::new(4.72, 1.4, 1.5),
        Vec2::new(3.0, 1.0),
    );
    scene.opaque.push(cushions);

    let mut arms = MeshBatch::new("couch-arms", None, DARK_WOOD);
    arms.box_between(
        Vec3::new(4.3, 0.4, -1.75),
        Vec3::new(4.6, 0.9, -1.5),
        Vec2::ONE,
    );
    arms.box_between(
        Vec3::new(4.3, 0.4, 1.5),
        Vec3::new(4.6, 0.9, 1.75),
        Vec2::ONE,
    );
    scene.opaque.push(arms);

    let mut legs = MeshBatch::new("couch-legs", None, GOLD);
    legs.box_between(
        Vec3::new(4.8, 0.0, -1.6),
        Vec3::new(4.9, 0.1, -1.5),
        Vec2::ONE,
    );
    legs.box_between(Vec3::new(4.8, 0.0, 1.5), Vec3::new(4.9, 0.1, 1.6), Vec2::ONE);
    legs.box_between(
        Vec3::new(4.2, 0.0, -1.6),
        Vec3::new(4.3, 0.1, -1.5),
        Vec2::ONE,
    );
    legs.box_between(Vec3::new(4.2, 0.0, 1.5), Vec3::new(4.3, 0.1, 1.6), Vec2::ONE);
    scene.opaque.push(legs);

    let mut pillows = MeshBatch::new(
        "couch-pillows",
        Some(Surface::Couch),
        Vec4::new(0.9, 0.9, 0.9, 1.0),
    );
    for i in 0..3 {
        let z = -0.8 + i as f32 * 0.8;
        pillows.unit_box(
            Mat4::from_translation(Vec3::new(4.6, 0.8, z))
                * Mat4::from_rotation_x(15.0_f32.to_radians())
                * Mat4::from_scale(Vec3::splat(0.35)),
        );
    }
    scene.opaque.push(pillows);
}

fn sunlight_shaft(scene: &mut SceneGeometry) {
    // translucent beam slanting from the window into the room
    let mut shaft = MeshBatch::new("sunlight-shaft", None, Vec4::new(1.0, 0.85, 0.45, 0.25))
        .unlit()
        .visible(Visibility::DayOnly);
    shaft.quad(
        [
            Vec3::new(-4.98, 3.4, -0.6),
            Vec3::new(-4.98, 2.0, 0.6),
            Vec3::new(-2.0, 1.0, 1.8),
            Vec3::new(-2.0, 3.2, -1.8),
        ],
        Vec3::X,
        rect_uv(Vec2::ONE),
    );
    scene.transparent.push(shaft);
}

/// Contact-shadow batch: a dark translucent quad just above the supporting
/// surface.
fn shadow_batch(label: &'static str, alpha: f32) -> MeshBatch {
    MeshBatch::new(label, None, Vec4::new(0.0, 0.0, 0.0, alpha)).unlit()
}

/// Sheet of paper with its center line raised, giving a slight curl.
fn curved_sheet(batch: &mut MeshBatch, min: Vec3, max: Vec3) {
    let lift = 0.02;
    let mid = Vec3::new((min.x + max.x) * 0.5, min.y + lift, (min.z + max.z) * 0.5);
    batch.tri(
        [min, Vec3::new(max.x, min.y, min.z), mid],
        Vec3::Y,
        [Vec2::ZERO, Vec2::X, Vec2::new(0.5, 1.0)],
    );
    batch.tri(
        [mid, Vec3::new(max.x, max.y, max.z), Vec3::new(min.x, max.y, max.z)],
        Vec3::Y,
        [Vec2::new(0.5, 1.0), Vec2::X, Vec2::ZERO],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn building_twice_yields_identical_content() {
        let a = build_scene();
        let b = build_scene();
        assert_eq!(a.batch_count(), b.batch_count());
        for (left, right) in a.opaque.iter().zip(b.opaque.iter()) {
            assert_eq!(left.vertices, right.vertices);
            assert_eq!(left.indices, right.indices);
        }
    }

    #[test]
    fn every_batch_has_geometry_and_valid_indices() {
        let scene = build_scene();
        for batch in scene.opaque.iter().chain(scene.transparent.iter()) {
            assert!(!batch.is_empty(), "{} is empty", batch.label);
            assert_eq!(batch.indices.len() % 3, 0, "{} not triangles", batch.label);
            let limit = batch.vertices.len() as u32;
            assert!(
                batch.indices.iter().all(|&index| index < limit),
                "{} has out-of-range indices",
                batch.label
            );
        }
    }

    #[test]
    fn transparent_batches_are_translucent_and_unlit() {
        let scene = build_scene();
        assert!(!scene.transparent.is_empty());
        for batch in &scene.transparent {
            assert!(batch.color.w < 1.0, "{} is fully opaque", batch.label);
            assert!(batch.unlit, "{} should skip lighting", batch.label);
        }
    }

    #[test]
    fn day_and_night_effects_are_tagged() {
        let scene = build_scene();
        let shaft = scene
            .transparent
            .iter()
            .find(|batch| batch.label == "sunlight-shaft")
            .unwrap();
        assert_eq!(shaft.visibility, Visibility::DayOnly);
        let glow = scene
            .transparent
            .iter()
            .find(|batch| batch.label == "lamp-glow")
            .unwrap();
        assert_eq!(glow.visibility, Visibility::NightOnly);
        // everything opaque is state-independent
        assert!(scene
            .opaque
            .iter()
            .all(|batch| batch.visibility == Visibility::Always));
    }

    #[test]
    fn opaque_list_starts_with_the_room_shell() {
        let scene = build_scene();
        assert_eq!(scene.opaque[0].label, "floor");
        assert_eq!(scene.opaque[1].label, "walls");
    }
}
