use mc_rs_proto::bedrock::Text;
use mc_rs_proto::java::SystemChat;

use crate::error::TranslateError;
use crate::session::Session;

pub(super) fn system_chat(session: &mut Session, packet: &SystemChat) -> Result<(), TranslateError> {
    session.send_upstream(Text {
        source_name: String::new(),
        message: packet.content.clone(),
        xuid: String::new(),
    });
    Ok(())
}
