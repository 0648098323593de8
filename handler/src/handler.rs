use lumen_api::prelude::InitAccount;
use lumen_api::effect::Effect;
use lumen_core::error::Result;
use lumen_api::event::Event;

pub trait HandlerT: Send + Sync {
    fn handle_event(&mut self, effect: &Effect, event: &Event) -> Result<Effect>;

    fn init_state(&mut self, init_account: &InitAccount) -> Result<Effect>;
}
