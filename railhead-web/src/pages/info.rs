use yew::prelude::*;

#[function_component(About)]
pub fn about() -> Html {
    html! {
        <section class="panel about">
            <h1>{ "About" }</h1>
            <p>{ "Railhead is a browser client for 18xx-style railroad games." }</p>
        </section>
    }
}

#[function_component(CreateGame)]
pub fn create_game() -> Html {
    html! {
        <section class="panel create-game">
            <h1>{ "Create Game" }</h1>
            <form>
                <label>
                    { "Title" }
                    <input name="title" />
                </label>
                <label>
                    <input type="checkbox" name="hotseat" />
                    { "Hotseat" }
                </label>
            </form>
        </section>
    }
}
