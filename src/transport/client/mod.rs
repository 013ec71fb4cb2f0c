pub(crate) mod git_client;
pub(crate) mod packet;

use crate::error::Result;
use crate::refs::Advertisement;

pub trait Protocol {
    fn discover_refs(&mut self) -> Result<Advertisement>;
    fn protocol(&self) -> &'static str;
}
