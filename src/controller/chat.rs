use crate::traits::PlannerApi;

use super::Controller;

const APOLOGY: &str = "Sorry, there was an error processing your request.";

impl<A: PlannerApi> Controller<A> {
    /// Send what has been typed in the chat input.
    ///
    /// The message is shown right away, then the reply is appended once received.
    /// Returns `false` if there was nothing to send.
    pub async fn send_chat_input(&mut self) -> bool {
        let message = self.chat.input().trim().to_string();
        if message.is_empty() {
            return false;
        }

        self.chat.push_user_message(&message);
        self.chat.take_input();

        match self.api.chat(&message).await {
            Ok(reply) => self.chat.push_reply(reply),
            Err(err) => {
                if self.redirect_on_auth_failure(&err) == false {
                    log::error!("Error sending chat message: {}", err);
                    self.chat.push_reply(APOLOGY);
                }
            },
        }
        true
    }

    /// Type `message` in the chat input, and send it
    pub async fn send_message(&mut self, message: &str) -> bool {
        self.chat.set_input(message);
        self.send_chat_input().await
    }
}
