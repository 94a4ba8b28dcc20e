//! Simple flavor view templates, copied verbatim per engine

pub const DUST_INDEX: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title>{title}</title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    <h1>{title}</h1>
    <p>Welcome to {title}</p>
  </body>
</html>
";

pub const DUST_ERROR: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title>{message}</title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    <h1>{message}</h1>
    <h2>{error.status}</h2>
    <pre>{error.stack}</pre>
  </body>
</html>
";

pub const EJS_INDEX: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title><%= title %></title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    <h1><%= title %></h1>
    <p>Welcome to <%= title %></p>
  </body>
</html>
";

pub const EJS_ERROR: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title><%= message %></title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    <h1><%= message %></h1>
    <h2><%= error.status %></h2>
    <pre><%= error.stack %></pre>
  </body>
</html>
";

pub const HBS_INDEX: &str = r"<h1>{{title}}</h1>
<p>Welcome to {{title}}</p>
";

pub const HBS_LAYOUT: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title>{{title}}</title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    {{{body}}}
  </body>
</html>
";

pub const HBS_ERROR: &str = r"<h1>{{message}}</h1>
<h2>{{error.status}}</h2>
<pre>{{error.stack}}</pre>
";

pub const HJS_INDEX: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title>{{ title }}</title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    <h1>{{ title }}</h1>
    <p>Welcome to {{ title }}</p>
  </body>
</html>
";

pub const HJS_ERROR: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title>{{ message }}</title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    <h1>{{ message }}</h1>
    <h2>{{ error.status }}</h2>
    <pre>{{ error.stack }}</pre>
  </body>
</html>
";

pub const JADE_INDEX: &str = r"extends layout

block content
  h1= title
  p Welcome to #{title}
";

pub const JADE_LAYOUT: &str = r"doctype html
html
  head
    title= title
    link(rel='stylesheet', href='/stylesheets/style.css')
  body
    block content
";

pub const JADE_ERROR: &str = r"extends layout

block content
  h1= message
  h2= error.status
  pre #{error.stack}
";

pub const PUG_INDEX: &str = r"extends layout

block content
  h1= title
  p Welcome to #{title}
";

pub const PUG_LAYOUT: &str = r"doctype html
html
  head
    title= title
    link(rel='stylesheet', href='/stylesheets/style.css')
  body
    block content
";

pub const PUG_ERROR: &str = r"extends layout

block content
  h1= message
  h2= error.status
  pre #{error.stack}
";

pub const TWIG_INDEX: &str = r"{% extends 'layout.twig' %}

{% block body %}
  <h1>{{ title }}</h1>
  <p>Welcome to {{ title }}</p>
{% endblock %}
";

pub const TWIG_LAYOUT: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title>{{ title }}</title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    {% block body %}{% endblock %}
  </body>
</html>
";

pub const TWIG_ERROR: &str = r"{% extends 'layout.twig' %}

{% block body %}
  <h1>{{ message }}</h1>
  <h2>{{ error.status }}</h2>
  <pre>{{ error.stack }}</pre>
{% endblock %}
";

pub const VASH_INDEX: &str = r"@html.extend('layout', function(model){
  model.replace('content', function(model){
    <h1>@model.title</h1>
    <p>Welcome to @model.title</p>
  })
})
";

pub const VASH_LAYOUT: &str = r"<!DOCTYPE html>
<html>
  <head>
    <title>@model.title</title>
    <link rel='stylesheet' href='/stylesheets/style.css' />
  </head>
  <body>
    @html.block('content')
  </body>
</html>
";

pub const VASH_ERROR: &str = r"@html.extend('layout', function(model){
  model.replace('content', function(model){
    <h1>@model.message</h1>
    <h2>@model.error.status</h2>
    <pre>@model.error.stack</pre>
  })
})
";
