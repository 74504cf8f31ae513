/*!
# mapgl Engine - Headless Backend

Software implementation of the mapgl_engine `Backend` trait.

Objects live in CPU memory, so contexts can be created without a GPU or a
window: for tests, for server-side rendering of map snapshots, and for any
code that only needs the read-back of an off-screen target.

# Example

```no_run
use mapgl_engine::mapgl::gl::{Config, Context, Size};
use mapgl_engine::mapgl::util::OffscreenTexture;
use mapgl_engine_headless::mapgl::{HeadlessBackend, HeadlessConfig};

# fn main() -> mapgl_engine::mapgl::Result<()> {
let mut context = Context::new(HeadlessBackend::new(HeadlessConfig::default()), Config::default());
let mut target = OffscreenTexture::new(&context, Size::new(256, 256));
target.bind(&mut context)?;
let image = target.read_still_image(&mut context)?;
assert_eq!(image.size(), Size::new(256, 256));
# Ok(())
# }
```
*/

mod headless_config;
mod headless_texture;
mod headless_frame_buffer;
mod headless_backend;

// Main mapgl namespace module
pub mod mapgl {
    pub use crate::headless_backend::HeadlessBackend;
    pub use crate::headless_config::HeadlessConfig;
}
